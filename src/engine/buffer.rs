//! Live file content bindings
//!
//! A `Buffer` is the in-memory representation of one visited file: its
//! content, a modified-since-load flag, the on-disk timestamp it was last
//! synchronized against, and a resting cursor. `BufferSet` is the registry
//! of live buffers the engine may touch across a session. Content reaches
//! buffers through a `ContentStore`, so tests can run against an in-memory
//! store while the CLI uses the filesystem.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Capability for loading file content and inspecting on-disk state
pub trait ContentStore {
    /// Load the current content of `path` together with its on-disk timestamp
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be read.
    fn load(&self, path: &Path) -> io::Result<(String, DateTime<Utc>)>;

    /// Report the current on-disk timestamp of `path`
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be inspected.
    fn mtime(&self, path: &Path) -> io::Result<DateTime<Utc>>;
}

/// Filesystem-backed content store
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl ContentStore for FsStore {
    fn load(&self, path: &Path) -> io::Result<(String, DateTime<Utc>)> {
        let content = std::fs::read_to_string(path)?;
        let mtime = self.mtime(path)?;
        Ok((content, mtime))
    }

    fn mtime(&self, path: &Path) -> io::Result<DateTime<Utc>> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(modified.into())
    }
}

/// In-memory copy of one file's content
#[derive(Debug, Clone)]
pub struct Buffer {
    pub content: String,
    /// True once the content diverged from what was loaded
    pub modified: bool,
    /// On-disk timestamp the content was last synchronized against
    pub synced_at: DateTime<Utc>,
    /// Resting position, restored when a scan misses and the file is abandoned
    pub cursor: usize,
    /// True for bindings created solely to scan; dropped when the scan misses
    pub ephemeral: bool,
}

impl Buffer {
    #[must_use]
    pub const fn new(content: String, synced_at: DateTime<Utc>, ephemeral: bool) -> Self {
        Self {
            content,
            modified: false,
            synced_at,
            cursor: 0,
            ephemeral,
        }
    }

    /// Whether the on-disk timestamp has moved past the synchronized one
    #[must_use]
    pub fn is_stale(&self, on_disk: DateTime<Utc>) -> bool {
        on_disk != self.synced_at
    }

    /// Replace the content with a fresh on-disk copy
    ///
    /// Clears the modified flag; the cursor is not guaranteed meaningful
    /// afterwards and is reset to the start of the content.
    pub fn reload(&mut self, content: String, synced_at: DateTime<Utc>) {
        self.content = content;
        self.modified = false;
        self.synced_at = synced_at;
        self.cursor = 0;
    }
}

/// Registry of live buffers keyed by file path
#[derive(Debug, Default)]
pub struct BufferSet {
    buffers: HashMap<PathBuf, Buffer>,
}

impl BufferSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Buffer> {
        self.buffers.get(path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Buffer> {
        self.buffers.get_mut(path)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.buffers.contains_key(path)
    }

    pub fn insert(&mut self, path: PathBuf, buffer: Buffer) {
        self.buffers.insert(path, buffer);
    }

    /// Drop the binding for `path`, releasing its content
    pub fn discard(&mut self, path: &Path) {
        self.buffers.remove(path);
    }

    /// Number of live bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_buffer_staleness() {
        let buf = Buffer::new("hello".into(), stamp(100), false);
        assert!(!buf.is_stale(stamp(100)));
        assert!(buf.is_stale(stamp(200)));
    }

    #[test]
    fn test_buffer_reload_clears_modified_and_cursor() {
        let mut buf = Buffer::new("hello".into(), stamp(100), false);
        buf.modified = true;
        buf.cursor = 3;

        buf.reload("fresh".into(), stamp(200));

        assert_eq!(buf.content, "fresh");
        assert!(!buf.modified);
        assert_eq!(buf.synced_at, stamp(200));
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn test_buffer_set_insert_and_discard() {
        let mut set = BufferSet::new();
        let path = PathBuf::from("a.txt");

        set.insert(path.clone(), Buffer::new("x".into(), stamp(1), true));
        assert!(set.contains(&path));
        assert_eq!(set.len(), 1);

        set.discard(&path);
        assert!(!set.contains(&path));
        assert!(set.is_empty());
    }

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!(
            "scour_buffer_test_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.txt");
        std::fs::write(&path, "on disk").unwrap();

        let store = FsStore;
        let (content, loaded_at) = store.load(&path).unwrap();
        assert_eq!(content, "on disk");
        assert_eq!(store.mtime(&path).unwrap(), loaded_at);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
