//! AES-encrypted JSON files, one per document.
//!
//! Each document lives at `<data_dir>/<name>` as `IV || ciphertext`. Every
//! operation derives the key afresh from the store's `SecretSource`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::locks::KeyLocks;
use super::names::validate_name;
use super::secret::{SecretSource, StaticSecret};
use super::traits::DocumentStore;
use crate::crypto::{decode, derive_key, encode, DerivedKey};
use crate::error::{AacError, Result};

/// Encrypted document store backed by a directory of files.
///
/// `write` and `update` on the same name are serialized inside this
/// instance. Separate processes (or separate instances over one directory)
/// still race: the last write wins.
pub struct EncryptedFileStore {
    data_dir: PathBuf,
    secret: Box<dyn SecretSource>,
    locks: KeyLocks,
}

impl EncryptedFileStore {
    /// Create a store over `data_dir`. The directory is created on first write.
    pub fn new(data_dir: impl Into<PathBuf>, secret: impl SecretSource + 'static) -> Self {
        Self {
            data_dir: data_dir.into(),
            secret: Box::new(secret),
            locks: KeyLocks::new(),
        }
    }

    /// Convenience constructor for a fixed secret.
    pub fn with_secret(data_dir: impl Into<PathBuf>, secret: &str) -> Self {
        Self::new(data_dir, StaticSecret::new(secret))
    }

    /// Base directory documents are stored in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// On-disk path for a document name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.data_dir.join(name))
    }

    fn current_key(&self) -> Result<DerivedKey> {
        let secret = self.secret.secret()?;
        Ok(derive_key(&secret))
    }

    fn read_unlocked<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path_for(name)?;
        let sealed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(document = name, "document not found");
                return Ok(None);
            }
            Err(err) => return Err(AacError::io(path, err)),
        };

        let key = self.current_key()?;
        let plain = decode(&sealed, &key).map_err(|e| AacError::corrupt(name, e))?;
        let value = serde_json::from_slice(&plain).map_err(|e| {
            if e.is_data() {
                AacError::corrupt(name, format!("unexpected document shape: {}", e))
            } else {
                AacError::corrupt(name, format!("invalid JSON after decryption: {}", e))
            }
        })?;

        debug!(document = name, bytes = sealed.len(), "read document");
        Ok(Some(value))
    }

    fn write_unlocked<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path_for(name)?;
        let plain = serde_json::to_vec(value).map_err(|source| AacError::Serialization {
            name: name.to_string(),
            source,
        })?;

        let key = self.current_key()?;
        let sealed = encode(&plain, &key);
        crate::fs::write_atomic(&path, &sealed).map_err(|e| AacError::io(&path, e))?;

        debug!(document = name, bytes = sealed.len(), "wrote document");
        Ok(())
    }
}

impl DocumentStore for EncryptedFileStore {
    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.read_unlocked(name)
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let lock = self.locks.handle(name);
        let _guard = lock.lock();
        self.write_unlocked(name, value)
    }

    fn update<T, F>(&self, name: &str, transform: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> T,
    {
        validate_name(name)?;
        let lock = self.locks.handle(name);
        let _guard = lock.lock();

        let current = self.read_unlocked(name)?;
        let existed = current.is_some();
        let next = transform(current);
        self.write_unlocked(name, &next)?;

        debug!(document = name, existed, "updated document");
        Ok(next)
    }

    fn list_documents(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(AacError::io(&self.data_dir, err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AacError::io(&self.data_dir, e))?;
            let file_type = entry.file_type().map_err(|e| AacError::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if validate_name(name).is_ok() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::IV_LENGTH;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> EncryptedFileStore {
        EncryptedFileStore::with_secret(dir, "test-secret-123")
    }

    #[test]
    fn test_read_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let value: Option<Vec<String>> = store.read("nonexistent.json").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_missing_data_dir_returns_none() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir.path().join("not-created-yet"));

        let value: Option<serde_json::Value> = store.read("people.json").unwrap();
        assert!(value.is_none());
        assert!(store.list_documents().unwrap().is_empty());
    }

    #[test]
    fn test_people_scenario() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.write("people.json", &vec!["alice", "bob"]).unwrap();
        let people: Option<Vec<String>> = store.read("people.json").unwrap();
        assert_eq!(people, Some(vec!["alice".to_string(), "bob".to_string()]));

        store.write("people.json", &Vec::<String>::new()).unwrap();
        let people: Option<Vec<String>> = store.read("people.json").unwrap();
        assert_eq!(people, Some(Vec::new()));
    }

    #[test]
    fn test_file_is_iv_plus_ciphertext() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.write("people.json", &vec!["alice", "bob"]).unwrap();
        let on_disk = fs::read(dir.path().join("people.json")).unwrap();

        // ["alice","bob"] is 15 bytes: one padded block
        assert_eq!(on_disk.len(), IV_LENGTH + 16);
        assert!(!String::from_utf8_lossy(&on_disk).contains("alice"));
    }

    #[test]
    fn test_update_creates_then_extends() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let first: Vec<u32> = store
            .update("numbers.json", |old: Option<Vec<u32>>| {
                assert!(old.is_none());
                vec![1]
            })
            .unwrap();
        assert_eq!(first, vec![1]);

        let second = store
            .update("numbers.json", |old: Option<Vec<u32>>| {
                let mut numbers = old.unwrap();
                assert_eq!(numbers, vec![1]);
                numbers.push(2);
                numbers
            })
            .unwrap();
        assert_eq!(second, vec![1, 2]);

        let stored: Option<Vec<u32>> = store.read("numbers.json").unwrap();
        assert_eq!(stored, Some(vec![1, 2]));
    }

    #[test]
    fn test_update_does_not_run_transform_on_corrupt() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("people.json"), b"not encrypted at all").unwrap();

        let mut called = false;
        let result = store.update("people.json", |_: Option<Vec<String>>| {
            called = true;
            Vec::new()
        });

        assert!(result.unwrap_err().is_corrupt());
        assert!(!called);
        assert_eq!(
            fs::read(dir.path().join("people.json")).unwrap(),
            b"not encrypted at all"
        );
    }

    #[test]
    fn test_invalid_name_rejected_everywhere() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(matches!(
            store.read::<serde_json::Value>("../escape.json"),
            Err(AacError::InvalidName(_))
        ));
        assert!(matches!(
            store.write("../escape.json", &1),
            Err(AacError::InvalidName(_))
        ));
        assert!(matches!(
            store.update("../escape.json", |_: Option<u8>| 1),
            Err(AacError::InvalidName(_))
        ));
        assert!(!dir.path().parent().unwrap().join("escape.json").exists());
    }

    #[test]
    fn test_shape_mismatch_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write("answers.json", &serde_json::json!({"1": "yes"})).unwrap();

        let err = store.read::<Vec<String>>("answers.json").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_list_documents_sorted_and_skips_temp_files() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.write("places.json", &Vec::<u8>::new()).unwrap();
        store.write("people.json", &Vec::<u8>::new()).unwrap();
        fs::write(dir.path().join(".people.json.1.2.tmp"), b"partial").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();

        assert_eq!(
            store.list_documents().unwrap(),
            vec!["people.json".to_string(), "places.json".to_string()]
        );
    }

    #[test]
    fn test_missing_secret_surfaces() {
        let dir = tempdir().unwrap();
        let store = EncryptedFileStore::new(
            dir.path(),
            crate::storage::EnvSecret::new("AAC_TEST_STORE_SECRET_NEVER_SET"),
        );

        let err = store.write("people.json", &1).unwrap_err();
        assert!(matches!(err, AacError::MissingSecret(_)));
        assert!(!dir.path().join("people.json").exists());
    }
}
