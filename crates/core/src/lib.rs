//! `hbnb-core` — record foundation building blocks.
//!
//! Identity, timestamps, field schemas and the domain error model. This crate
//! has no storage or IO concerns.

pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod timestamp;

pub use entity::{composite_key, describe_as, split_key, Entity, EntityMeta};
pub use error::{Argument, DomainError, DomainResult};
pub use field::{FieldKind, FieldSpec, CLASS_FIELD, MANAGED_FIELDS};
pub use id::EntityId;
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
