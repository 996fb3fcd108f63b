//! Snapshot persistence boundary.
//!
//! A backend stores one opaque snapshot buffer. Encoding and validation live
//! in [`crate::engine`]; backends only move bytes.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryBackend;
pub use json_file::JsonFileBackend;
pub use r#trait::SnapshotBackend;
