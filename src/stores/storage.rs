//! Persistence backends for the serialized account list.
//!
//! The store only needs to read the whole list once and overwrite it on
//! every (coalesced) change, so a backend is a single slot holding a string.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::Error;

/// Key the account list is stored under.
pub const ACCOUNTS_KEY: &str = "accounts";

pub trait AccountStorage: Send + Sync {
    /// Returns the stored list, or `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<String>, Error>;

    /// Replaces the stored list.
    fn save(&self, data: &str) -> Result<(), Error>;
}

/// In-memory backend. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<Option<String>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.slot() = Some(data.into());
        storage
    }

    /// Current stored value, without going through [`AccountStorage::load`].
    pub fn contents(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Number of times [`AccountStorage::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccountStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        Ok(self.contents())
    }

    fn save(&self, data: &str) -> Result<(), Error> {
        *self.slot() = Some(data.to_owned());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// File backend: the list lives in `<dir>/accounts.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{ACCOUNTS_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, data: &str) -> Result<(), Error> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        // Write next to the target and rename over it, so readers never see a partial list
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_starts_empty() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.save("[]").unwrap();
        storage.save("[1]").unwrap();

        assert_eq!(observer.load().unwrap().as_deref(), Some("[1]"));
        assert_eq!(observer.save_count(), 2);
    }

    #[test]
    fn test_memory_storage_with_data() {
        let storage = MemoryStorage::with_data("[]");
        assert_eq!(storage.contents().as_deref(), Some("[]"));
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_file_storage_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());

        storage.save(r#"[{"a":1}]"#).unwrap();
        assert_eq!(storage.path(), dir.path().join("accounts.json"));
        assert_eq!(storage.load().unwrap().as_deref(), Some(r#"[{"a":1}]"#));

        storage.save("[]").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("accounts.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let storage = FileStorage::in_dir(&nested);

        storage.save("[]").unwrap();
        assert!(nested.join("accounts.json").exists());
    }

    #[test]
    fn test_file_storage_read_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string
        fs::create_dir(dir.path().join("accounts.json")).unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert!(matches!(storage.load(), Err(Error::Io(_))));
    }
}
