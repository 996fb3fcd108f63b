//! Storage error model.

use std::path::PathBuf;

use hbnb_core::DomainError;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation error.
///
/// Domain failures (not found, unknown type, format) pass through unchanged;
/// the remaining variants are IO-side failures of a backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot buffer lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.domain().is_some_and(DomainError::is_not_found)
    }

    pub fn is_format(&self) -> bool {
        matches!(self.domain(), Some(DomainError::Format(_)))
    }
}
