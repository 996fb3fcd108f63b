//! Configuration loading and representation.

use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const STORAGE_PATH_ENV: &str = "HBNB_STORAGE_PATH";

pub const DEFAULT_STORAGE_PATH: &str = "file.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub file_path: PathBuf,
}

impl StorageConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(STORAGE_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => Self::new(path),
            None => {
                tracing::debug!("{STORAGE_PATH_ENV} not set; using {DEFAULT_STORAGE_PATH}");
                Self::default()
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }
}
