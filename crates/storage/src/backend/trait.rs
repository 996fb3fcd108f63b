use std::sync::Arc;

use crate::error::StorageResult;

/// Whole-snapshot storage.
///
/// `write` replaces the previous snapshot as a single operation: readers see
/// either the old buffer or the new one, never a partial write. `read`
/// returns `Ok(None)` when no snapshot has been written yet; that is the only
/// absent-data case absorbed rather than reported.
pub trait SnapshotBackend: Send + Sync {
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    fn write(&self, snapshot: &[u8]) -> StorageResult<()>;
}

impl<S> SnapshotBackend for Arc<S>
where
    S: SnapshotBackend + ?Sized,
{
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, snapshot: &[u8]) -> StorageResult<()> {
        (**self).write(snapshot)
    }
}

impl<S> SnapshotBackend for Box<S>
where
    S: SnapshotBackend + ?Sized,
{
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, snapshot: &[u8]) -> StorageResult<()> {
        (**self).write(snapshot)
    }
}
