//! File-backed key/value storage.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use meridian_application::ports::{KeyValueStorage, StorageError};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::serialization::to_json_stable;

const APP_DIR: &str = "meridian";
const FILE_NAME: &str = "storage.json";

/// Stores every key in one JSON object on disk.
///
/// The file is re-read on every access so several processes sharing it see
/// each other's writes; the lock only serializes writers of this process.
#[derive(Debug)]
pub struct FileKeyValueStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStorage {
    /// Uses the file at `path`; it is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<config dir>/meridian/storage.json`, if the platform has a config
    /// directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Storage at [`Self::default_path`].
    #[must_use]
    pub fn in_config_dir() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(io_error(&e)),
        }
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = to_json_stable(items).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| io_error(&e))?;

        // Readers see either the old or the new file, never a partial one.
        let mut staged = NamedTempFile::new_in(dir).map_err(|e| io_error(&e))?;
        staged.write_all(json.as_bytes()).map_err(|e| io_error(&e))?;
        staged.persist(&self.path).map_err(|e| io_error(&e.error))?;
        Ok(())
    }
}

fn io_error(error: &std::io::Error) -> StorageError {
    if error.kind() == ErrorKind::PermissionDenied {
        StorageError::AccessDenied(error.to_string())
    } else {
        StorageError::Io(error.to_string())
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.store(&items)?;
        tracing::trace!(key, path = %self.path.display(), "storage item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }
}
