use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::r#trait::SnapshotBackend;
use crate::error::{StorageError, StorageResult};

/// Snapshot kept in a single JSON file.
///
/// Writes go to a sibling `<file>.tmp`, are synced, then renamed over the
/// target, so an interrupted save leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_temp(&self, temp: &Path, snapshot: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(temp)?;
        file.write_all(snapshot)?;
        file.sync_all()
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot file yet");
                Ok(None)
            }
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    fn write(&self, snapshot: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, snapshot) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::io(&temp, e));
        }
        fs::rename(&temp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), bytes = snapshot.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("file.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn write_replaces_contents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let backend = JsonFileBackend::new(&path);

        backend.write(b"{\"a\":1}").unwrap();
        backend.write(b"{}").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{}");
        assert!(!dir.path().join("file.json.tmp").exists());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("file.json");
        let backend = JsonFileBackend::new(&path);

        backend.write(b"{}").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let backend = JsonFileBackend::new(dir.path());
        assert!(matches!(backend.read().unwrap_err(), StorageError::Io { .. }));
    }
}
