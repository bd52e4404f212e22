//! # Secure Store Backends
//!
//! Implementations of [`SecureStore`] available outside a mobile platform.
//!
//! - [`MemorySecureStore`]: process-lifetime map, used by tests and ephemeral sessions
//! - [`FileSecureStore`]: JSON file on disk, used by the CLI during development
//!
//! Neither encrypts data. On device the embedding app provides a Keychain or
//! Keystore backed implementation of the same trait.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::core::service::{SecureStore, StorageError};

/// In-memory secure store.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// File-backed secure store holding a flat JSON object.
///
/// Writes go to a sibling temp file that is renamed over the original, so a
/// crash mid-write never leaves a truncated file behind.
#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileSecureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self, operation: &'static str, key: &str) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::new(operation, key, format!("corrupt store file: {}", e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::new(operation, key, e)),
        }
    }

    async fn persist(
        &self,
        operation: &'static str,
        key: &str,
        entries: &HashMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::new(operation, key, e))?;
        }

        let contents = serde_json::to_vec_pretty(entries).map_err(|e| StorageError::new(operation, key, e))?;
        let tmp_path = temp_path(&self.path);

        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| StorageError::new(operation, key, e))?;
        restrict_permissions(&tmp_path).await;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StorageError::new(operation, key, e))
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to restrict secure store permissions");
    }
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) {}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.load("get", key).await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load("set", key).await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist("set", key, &entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load("delete", key).await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist("delete", key, &entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("signals-store-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySecureStore::new();
        assert_eq!(store.get("refresh_token").await.unwrap(), None);

        store.set("refresh_token", "r1").await.unwrap();
        store.set("refresh_token", "r2").await.unwrap();
        assert_eq!(store.get("refresh_token").await.unwrap().as_deref(), Some("r2"));
        assert_eq!(store.len(), 1);

        store.delete("refresh_token").await.unwrap();
        store.delete("refresh_token").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let path = temp_store_path();

        let store = FileSecureStore::new(&path);
        assert_eq!(store.get("refresh_token").await.unwrap(), None);
        store.set("refresh_token", "r1").await.unwrap();
        store.set("other", "x").await.unwrap();

        let reopened = FileSecureStore::new(&path);
        assert_eq!(reopened.get("refresh_token").await.unwrap().as_deref(), Some("r1"));

        reopened.delete("refresh_token").await.unwrap();
        reopened.delete("refresh_token").await.unwrap();
        assert_eq!(store.get("refresh_token").await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("x"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_temp_path_never_aliases_target() {
        assert_eq!(temp_path(Path::new("data/session.json")), PathBuf::from("data/session.json.tmp"));
        assert_eq!(temp_path(Path::new("data/session.tmp")), PathBuf::from("data/session.tmp.tmp"));
    }

    #[tokio::test]
    async fn test_file_store_with_tmp_extension() {
        let path = temp_store_path().with_file_name("session.tmp");

        let store = FileSecureStore::new(&path);
        store.set("refresh_token", "r1").await.unwrap();
        store.set("refresh_token", "r2").await.unwrap();

        let reopened = FileSecureStore::new(&path);
        assert_eq!(reopened.get("refresh_token").await.unwrap().as_deref(), Some("r2"));
        assert!(!temp_path(&path).exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_file_store_reports_corrupt_file() {
        let path = temp_store_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let err = FileSecureStore::new(&path).get("refresh_token").await.unwrap_err();
        assert_eq!(err.operation, "get");
        assert!(err.reason.contains("corrupt"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
