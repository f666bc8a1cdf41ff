//! # File-Backed Storage
//!
//! Local storage has to survive a window reload: the router's reload guard is
//! written right before the reload and read right after it. [`FileStorage`]
//! keeps the map in memory and writes the whole map through to a JSON file on
//! every change.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bazaar_core::KeyValueStorage;
use tracing::debug;

use crate::error::{ShellError, ShellResult};

/// JSON-file key-value storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> ShellResult<Self> {
        let path = path.into();

        let items = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| ShellError::StorageCorrupt {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "Storage file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => {
                return Err(ShellError::StorageIo {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        Ok(FileStorage { path, items })
    }

    fn flush(&self) -> ShellResult<()> {
        let io_err = |source| ShellError::StorageIo {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(&self.items).map_err(|e| {
            ShellError::Storage(format!("failed to serialize storage: {}", e))
        })?;
        std::fs::write(&self.path, contents).map_err(io_err)
    }
}

impl KeyValueStorage for FileStorage {
    type Error = ShellError;

    fn get_item(&self, key: &str) -> ShellResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> ShellResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> ShellResult<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("ls.json")).unwrap();
        assert_eq!(storage.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("ls.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("bazaar:dynamic-reload", "true").unwrap();
        drop(storage);

        let mut reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("bazaar:dynamic-reload").unwrap().as_deref(),
            Some("true")
        );

        reopened.remove_item("bazaar:dynamic-reload").unwrap();
        let again = FileStorage::open(&path).unwrap();
        assert_eq!(again.get_item("bazaar:dynamic-reload").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(ShellError::StorageCorrupt { .. })
        ));
    }
}
