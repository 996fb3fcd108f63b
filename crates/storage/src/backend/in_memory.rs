use std::sync::RwLock;

use super::r#trait::SnapshotBackend;
use crate::error::{StorageError, StorageResult};

/// In-memory snapshot buffer.
///
/// Intended for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    snapshot: RwLock<Option<Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot, e.g. a hand-written document.
    pub fn with_snapshot(snapshot: impl Into<Vec<u8>>) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot.into())),
        }
    }

    /// The last written snapshot, if any.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.snapshot.read().ok()?.clone()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        let snapshot = self.snapshot.read().map_err(|_| StorageError::Poisoned)?;
        Ok(snapshot.clone())
    }

    fn write(&self, snapshot: &[u8]) -> StorageResult<()> {
        let mut slot = self.snapshot.write().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(snapshot.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_written() {
        let backend = InMemoryBackend::new();
        assert!(backend.read().unwrap().is_none());

        backend.write(b"{}").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some(&b"{}"[..]));
        assert_eq!(backend.snapshot().as_deref(), Some(&b"{}"[..]));
    }
}
