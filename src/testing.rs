//! Testing utilities for scour
//!
//! This module provides helper types for writing tests, including an
//! in-memory `ContentStore` so engine tests run without touching the
//! filesystem.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::engine::ContentStore;

/// In-memory content store with explicit timestamps
///
/// Every `put` bumps the entry's timestamp, so staleness scenarios are a
/// matter of writing to the store behind the engine's back.
///
/// # Examples
/// ```
/// # use scour::testing::MemStore;
/// let store = MemStore::new();
/// store.put("a.txt", "hello");
/// assert_eq!(store.get("a.txt").unwrap(), "hello");
/// ```
#[derive(Clone)]
pub struct MemStore {
    files: Rc<RefCell<HashMap<PathBuf, (String, DateTime<Utc>)>>>,
    clock: Rc<RefCell<DateTime<Utc>>>,
}

impl MemStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Rc::new(RefCell::new(HashMap::new())),
            clock: Rc::new(RefCell::new(Utc.timestamp_opt(1_000_000, 0).unwrap())),
        }
    }

    /// Write `content` at `path`, advancing its on-disk timestamp
    pub fn put(&self, path: &str, content: &str) {
        let stamp = {
            let mut clock = self.clock.borrow_mut();
            *clock += Duration::seconds(1);
            *clock
        };
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), (content.to_string(), stamp));
    }

    /// Read the current content at `path`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|(content, _)| content.clone())
    }

    /// Remove `path`, making subsequent loads fail
    pub fn remove(&self, path: &str) {
        self.files.borrow_mut().remove(Path::new(path));
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemStore {
    fn load(&self, path: &Path) -> io::Result<(String, DateTime<Utc>)> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn mtime(&self, path: &Path) -> io::Result<DateTime<Utc>> {
        self.files
            .borrow()
            .get(path)
            .map(|(_, stamp)| *stamp)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_put_and_load() {
        let store = MemStore::new();
        store.put("a.txt", "content");

        let (content, stamp) = store.load(Path::new("a.txt")).unwrap();
        assert_eq!(content, "content");
        assert_eq!(store.mtime(Path::new("a.txt")).unwrap(), stamp);
    }

    #[test]
    fn test_mem_store_rewrites_bump_timestamp() {
        let store = MemStore::new();
        store.put("a.txt", "v1");
        let first = store.mtime(Path::new("a.txt")).unwrap();

        store.put("a.txt", "v2");
        let second = store.mtime(Path::new("a.txt")).unwrap();

        assert!(second > first);
        assert_eq!(store.get("a.txt").unwrap(), "v2");
    }

    #[test]
    fn test_mem_store_missing_file_errors() {
        let store = MemStore::new();
        assert!(store.load(Path::new("gone.txt")).is_err());
        assert!(store.mtime(Path::new("gone.txt")).is_err());

        store.put("gone.txt", "here now");
        store.remove("gone.txt");
        assert!(store.load(Path::new("gone.txt")).is_err());
    }

    #[test]
    fn test_mem_store_clones_share_state() {
        let store = MemStore::new();
        let alias = store.clone();

        alias.put("a.txt", "shared");
        assert_eq!(store.get("a.txt").unwrap(), "shared");
    }
}
