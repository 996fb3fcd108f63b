//! Persistence layer: the live-record registry, the JSON snapshot engine and
//! the shell-facing record operations.

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod operations;
pub mod registry;
pub mod store;

pub use backend::{InMemoryBackend, JsonFileBackend, SnapshotBackend};
pub use config::{StorageConfig, DEFAULT_STORAGE_PATH, STORAGE_PATH_ENV};
pub use engine::Document;
pub use error::{StorageError, StorageResult};
pub use registry::Registry;
pub use store::Store;
