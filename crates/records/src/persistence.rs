//! Storage adapters for serialized collections.
//!
//! A [`Persistence`] maps a storage key to a string blob, the same contract
//! a browser's `localStorage` offers. Collections are stored whole: every
//! write replaces the blob for its key.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};

/// Key/value blob storage used by [`RecordStore`](crate::RecordStore).
pub trait Persistence: Send + Sync {
    /// Read the blob stored under `key`, or `None` when nothing was stored.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the blob stored under `key`.
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Forget `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local storage, used by tests and previews.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a uniquely named temporary file in the same directory that
/// is then renamed over the target, so readers never observe a half-written
/// collection and concurrent writers never share a staging file.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    root: PathBuf,
}

impl FilePersistence {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '.'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl Persistence for FilePersistence {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut staging = NamedTempFile::new_in(&self.root).map_err(io_error(key))?;
        staging.write_all(value.as_bytes()).map_err(io_error(key))?;
        staging
            .persist(self.file_for(key))
            .map_err(|e| io_error(key)(e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip_and_remove() {
        let store = MemoryPersistence::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "[1,2]").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("[1,2]"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn file_persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FilePersistence::open(dir.path()).unwrap();
            store.save("trojan-envoy-users", "[]").unwrap();
            store.save("trojan-envoy-users:next-id", "4").unwrap();
        }

        let reopened = FilePersistence::open(dir.path()).unwrap();
        assert_eq!(
            reopened.load("trojan-envoy-users").unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(
            reopened.load("trojan-envoy-users:next-id").unwrap().as_deref(),
            Some("4")
        );
        assert!(dir.path().join("trojan-envoy-users.next-id.json").exists());
    }

    #[test]
    fn file_persistence_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePersistence::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.load("waiting-list").unwrap(), None);
        store.remove("waiting-list").unwrap();
    }

    #[test]
    fn file_save_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePersistence::open(dir.path()).unwrap();
        store.save("waiting-list", "[]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["waiting-list.json".to_string()]);
    }

    #[test]
    fn concurrent_handles_do_not_clobber_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let a = FilePersistence::open(dir.path()).unwrap();
        let b = FilePersistence::open(dir.path()).unwrap();

        std::thread::scope(|scope| {
            for (store, value) in [(&a, "[\"a\"]"), (&b, "[\"b\"]")] {
                scope.spawn(move || {
                    for _ in 0..50 {
                        store.save("trojan-envoy-content", value).unwrap();
                    }
                });
            }
        });

        let stored = a.load("trojan-envoy-content").unwrap().unwrap();
        assert!(stored == "[\"a\"]" || stored == "[\"b\"]", "got {stored}");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
