//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement,
//! and the TransformExecutor trait the fetcher hands derived objects to.

use async_trait::async_trait;
use bytes::Bytes;
use mediagate_core::{ResolveError, StorageBackend, TransformPipeline};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
///
/// **Key format:** keys are the bucket-relative keys of resolved objects
/// (`/2024/pic.jpg`). Backends strip the leading `/` themselves.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object by its storage key
    async fn get(&self, storage_key: &str) -> StorageResult<Bytes>;

    /// Store an object under a storage key, replacing any existing object
    async fn put(&self, storage_key: &str, data: Bytes) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Executes a compiled transform pipeline on an original's bytes
#[async_trait]
pub trait TransformExecutor: Send + Sync {
    async fn execute(&self, data: Bytes, pipeline: &TransformPipeline) -> anyhow::Result<Bytes>;
}
