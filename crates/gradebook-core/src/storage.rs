//! Backing storage for the record store.
//!
//! [`FileStorage`] is the real backend. [`MemoryStorage`] keeps the content
//! in a shared buffer so tests and benches can inspect every save.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::NamedTempFile;

/// Something the store can read its whole content from and overwrite.
pub trait Storage: Send {
    /// Short description used in log lines (e.g. the file path).
    fn describe(&self) -> String;

    /// Read the full content, or `None` if nothing has been stored yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the full content.
    fn write(&mut self, content: &str) -> io::Result<()>;
}

/// A flat file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write next to the target and rename over it, so a failed save never
    /// leaves a truncated file behind. A symlinked target is followed and
    /// an existing file keeps its permissions.
    fn write(&mut self, content: &str) -> io::Result<()> {
        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(e),
        };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        if let Ok(meta) = fs::metadata(&target) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        tracing::trace!(path = %target.display(), bytes = content.len(), "file saved");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    content: Option<String>,
    writes: usize,
    fail_writes: bool,
}

/// In-memory storage. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing file content.
    pub fn with_content(content: &str) -> Self {
        let storage = Self::default();
        storage.lock().content = Some(content.to_string());
        storage
    }

    /// The last content written (or seeded).
    pub fn content(&self) -> Option<String> {
        self.lock().content.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make subsequent writes fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A poisoned buffer is still a valid string.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.lock().content.clone())
    }

    fn write(&mut self, content: &str) -> io::Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(io::Error::other("memory storage is set to fail writes"));
        }
        inner.content = Some(content.to_string());
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.txt"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn file_storage_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "old content that is longer than the new one\n").unwrap();

        let mut storage = FileStorage::new(&path);
        storage.write("new\n").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("new\n"));
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn file_storage_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nope").join("students.txt"));
        assert!(storage.write("x").is_err());
    }

    #[test]
    fn memory_storage_shares_buffer_between_clones() {
        let handle = MemoryStorage::with_content("seed");
        let mut storage = handle.clone();
        storage.write("next").unwrap();
        assert_eq!(handle.content().as_deref(), Some("next"));
        assert_eq!(handle.write_count(), 1);

        handle.set_fail_writes(true);
        assert!(storage.write("lost").is_err());
        assert_eq!(handle.content().as_deref(), Some("next"));
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "old\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileStorage::new(&path).write("new\n").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("students.txt");
        std::fs::write(&real, "old\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        FileStorage::new(&link).write("new\n").unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new\n");
    }
}
