use crate::keys::normalize_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// The root directory is not created here; `put` creates directories as it
    /// writes, so opening a storage for reads has no filesystem side effects.
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/mediagate/photos")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        if let Ok(metadata) = fs::metadata(&base_path).await {
            if !metadata.is_dir() {
                return Err(StorageError::ConfigError(format!(
                    "Storage root {} is not a directory",
                    base_path.display()
                )));
            }
        }

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Existing paths are canonicalized so a symlink cannot point outside the
    /// base storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        let key = normalize_key(storage_key)?;
        let path = self.base_path.join(&key);

        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn get(&self, storage_key: &str) -> StorageResult<Bytes> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(Bytes::from(data))
    }

    async fn put(&self, storage_key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_put_and_get() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let data = Bytes::from_static(b"hello world");
        storage.put("/2024/pic.jpg", data.clone()).await.unwrap();

        assert!(dir.path().join("2024/pic.jpg").exists());
        let downloaded = storage.get("/2024/pic.jpg").await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_local_storage_get_missing() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get("/missing.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound(key)) if key == "/missing.jpg"));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get("/../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .put("/a/../../escape.txt", Bytes::from_static(b"x"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_exists() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .put("/exists.txt", Bytes::from_static(b"test"))
            .await
            .unwrap();

        assert!(storage.exists("/exists.txt").await.unwrap());
        assert!(!storage.exists("/nonexistent.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_reads_do_not_create_base_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let storage = LocalStorage::new(&nested).await.unwrap();

        let result = storage.get("/missing.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!storage.exists("/missing.jpg").await.unwrap());
        assert!(!dir.path().join("a").exists());

        storage
            .put("/x/y.txt", Bytes::from_static(b"data"))
            .await
            .unwrap();
        assert!(nested.join("x/y.txt").is_file());
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_file_as_root_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("root.txt");
        std::fs::write(&file, b"x").unwrap();

        let result = LocalStorage::new(&file).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
