//! Key-value storage
//!
//! String-keyed, string-valued persistent storage. Each feature owns one key and stores
//! its whole payload under it. A missing key is a distinct state from an empty value.

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Key-value storage errors
#[derive(Debug, Error)]
pub enum KvError {
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Async string-keyed storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored at `key`, `None` if the key was never written
    async fn get_item(&self, key: &str) -> Result<Option<String>, KvError>;
    /// Durably replace the value stored at `key`
    async fn set_item(&self, key: &str, value: &str) -> Result<(), KvError>;
    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), KvError>;
}

fn validate_key(key: &str) -> Result<(), KvError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key
            .chars()
            .any(|ch| matches!(ch, '/' | '\\' | ':') || ch.is_control());
    if invalid {
        return Err(KvError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Write `value` to `temp_path`, then rename it over `path`
async fn replace_file(temp_path: &Path, path: &Path, value: &str) -> std::io::Result<()> {
    let mut temp_file = fs::File::create(temp_path).await?;
    temp_file.write_all(value.as_bytes()).await?;
    temp_file.sync_all().await?;
    drop(temp_file);

    // Rename over the old value so readers never observe a half-written file
    fs::rename(temp_path, path).await
}

// ============================================================================
// FileKeyValueStore - one file per key
// ============================================================================

/// File-backed store: each key lives in `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        let temp_path = self.root.join(format!("{}.json.tmp", key));

        fs::create_dir_all(&self.root).await?;

        if let Err(e) = replace_file(&temp_path, &path, value).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// MemoryKeyValueStore - in-process, nothing survives a restart
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, KvError> {
        validate_key(key)?;
        Ok(self.items.get(key).map(|value| value.clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), KvError> {
        validate_key(key)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), KvError> {
        validate_key(key)?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("quotes").is_ok());
        assert!(validate_key("saved-quotes_v2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("C:quotes").is_err());
    }

    #[tokio::test]
    async fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get_item("quotes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        store.set_item("quotes", "[]").await.unwrap();
        assert_eq!(store.get_item("quotes").await.unwrap().as_deref(), Some("[]"));

        store.set_item("quotes", "[1]").await.unwrap();
        assert_eq!(store.get_item("quotes").await.unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("nested").join("quotes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileKeyValueStore::new(dir.path())
            .set_item("quotes", "value")
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(dir.path());
        assert_eq!(reopened.get_item("quotes").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        store.set_item("quotes", "[]").await.unwrap();
        store.remove_item("quotes").await.unwrap();
        assert_eq!(store.get_item("quotes").await.unwrap(), None);
        // Removing again is fine
        store.remove_item("quotes").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the target's place makes the final rename fail
        std::fs::create_dir(dir.path().join("quotes.json")).unwrap();
        let store = FileKeyValueStore::new(dir.path());

        let err = store.set_item("quotes", "[]").await.unwrap_err();
        assert!(matches!(err, KvError::Io(_)));
        assert!(!dir.path().join("quotes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        let err = store.set_item("../escape", "x").await.unwrap_err();
        assert!(matches!(err, KvError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryKeyValueStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get_item("quotes").await.unwrap(), None);

        store.set_item("quotes", "[]").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_item("quotes").await.unwrap().as_deref(), Some("[]"));

        store.remove_item("quotes").await.unwrap();
        assert!(store.is_empty());
    }
}
