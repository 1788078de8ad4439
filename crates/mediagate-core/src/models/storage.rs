//! Storage configuration model: backend-agnostic description of where a bucket's objects live.

use serde::{Deserialize, Serialize};

use crate::storage_types::StorageBackend;

/// One physical storage a bucket can read from or write to (S3, local filesystem).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub kind: StorageBackend,
    /// Root directory for the local backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    pub fn local(root_path: impl Into<String>) -> Self {
        StorageConfig {
            kind: StorageBackend::Local,
            root_path: Some(root_path.into()),
            bucket: None,
            region: None,
            endpoint: None,
            access_key: None,
            secret_access_key: None,
        }
    }

    pub fn s3(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        StorageConfig {
            kind: StorageBackend::S3,
            root_path: None,
            bucket: Some(bucket.into()),
            region: Some(region.into()),
            endpoint: None,
            access_key: None,
            secret_access_key: None,
        }
    }

    /// Check that the fields the backend kind needs are present
    pub fn validate(&self) -> Result<(), String> {
        match self.kind {
            StorageBackend::Local => {
                if self.root_path.as_deref().map_or(true, str::is_empty) {
                    return Err("rootPath must be set for local storage".to_string());
                }
            }
            StorageBackend::S3 => {
                if self.bucket.as_deref().map_or(true, str::is_empty) {
                    return Err("bucket must be set for s3 storage".to_string());
                }
            }
        }
        Ok(())
    }
}

/// The two storages of a bucket: originals go to `basic`, derived objects to `transform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storages {
    pub basic: StorageConfig,
    /// Falls back to `basic` when not configured
    #[serde(default)]
    pub transform: Option<StorageConfig>,
}

impl Storages {
    pub fn new(basic: StorageConfig, transform: StorageConfig) -> Self {
        Storages {
            basic,
            transform: Some(transform),
        }
    }

    /// Pick the storage for an object: transform storage iff it carries a transform
    pub fn select(&self, has_transform: bool) -> &StorageConfig {
        if has_transform {
            self.transform.as_ref().unwrap_or(&self.basic)
        } else {
            &self.basic
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.basic.validate().map_err(|e| format!("basic: {}", e))?;
        if let Some(ref transform) = self.transform {
            transform
                .validate()
                .map_err(|e| format!("transform: {}", e))?;
        }
        Ok(())
    }
}
