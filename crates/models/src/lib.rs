//! Record types.
//!
//! One module per type, each a flat field schema layered on
//! [`hbnb_core::EntityMeta`], plus the closed [`Record`] union used by the
//! registry and the persistence engine.

pub mod amenity;
pub mod base_model;
pub mod city;
pub mod place;
pub mod record;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base_model::BaseModel;
pub use city::City;
pub use place::Place;
pub use record::{EntityKind, Record, Variant};
pub use review::Review;
pub use state::State;
pub use user::User;
