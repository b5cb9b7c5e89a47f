use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{Storage, StorageError};

/// Storage backed by a single JSON object file.
///
/// Every read goes to disk so that separate handles (or a second process)
/// on the same file always observe the latest written value.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Opening file storage");
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read storage file");
                return BTreeMap::new();
            }
        };

        if contents.trim().is_empty() {
            return BTreeMap::new();
        }

        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Storage file is corrupt, treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let contents = serde_json::to_string_pretty(map)?;
        // Unique sibling temp file, then an atomic rename over the target
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_all();
        if f(&mut map) {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|map| {
            map.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|map| map.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path().join("storage.json"));
        assert_eq!(storage.get_item("token"), None);
        // Removing from a file that does not exist must not create it
        storage.remove_item("token").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_set_get_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path().join("nested").join("storage.json"));

        storage.set_item("token", "abc123").unwrap();
        storage.set_item("other", "value").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("abc123"));

        storage.remove_item("token").unwrap();
        assert_eq!(storage.get_item("token"), None);
        assert_eq!(storage.get_item("other").as_deref(), Some("value"));
    }

    #[test]
    fn test_reads_through_to_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        let writer = FileStorage::open(&path);
        let reader = FileStorage::open(&path);

        writer.set_item("token", "first").unwrap();
        assert_eq!(reader.get_item("token").as_deref(), Some("first"));

        writer.set_item("token", "second").unwrap();
        assert_eq!(reader.get_item("token").as_deref(), Some("second"));
    }

    #[test]
    fn test_concurrent_handles_never_fail_or_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        let first = FileStorage::open(&path);
        let second = FileStorage::open(&path);

        std::thread::scope(|scope| {
            for (storage, key) in [(&first, "token"), (&second, "usuario")] {
                scope.spawn(move || {
                    for i in 0..50 {
                        storage.set_item(key, &i.to_string()).unwrap();
                    }
                });
            }
        });

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert!(!parsed.is_empty());
        // Only the storage file remains; no temp files are left behind
        let entries = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get_item("token"), None);

        storage.set_item("token", "fresh").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("fresh"));
    }
}
