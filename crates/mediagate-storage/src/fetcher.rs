//! Object fetcher - serves resolved objects from their storages
//!
//! Originals are read from the bucket's basic storage. Derived objects are read
//! from the transform storage; when they are missing and a transform executor is
//! configured, the parent is fetched, transformed, written back and returned.
//! Keys without a transform pipeline (originals, unknown presets) are never
//! generated, so nothing is written into the basic storage.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use mediagate_core::{ObjectDescriptor, ObjectResolver, StorageConfig};
use tokio::sync::Mutex;

use crate::factory::create_storage;
use crate::traits::{Storage, StorageError, StorageResult, TransformExecutor};

pub struct ObjectFetcher {
    resolver: ObjectResolver,
    executor: Option<Arc<dyn TransformExecutor>>,
    storages: Mutex<HashMap<StorageConfig, Arc<dyn Storage>>>,
}

impl ObjectFetcher {
    pub fn new(resolver: ObjectResolver) -> Self {
        ObjectFetcher {
            resolver,
            executor: None,
            storages: Mutex::new(HashMap::new()),
        }
    }

    /// Generate missing derived objects with this executor
    pub fn with_executor(mut self, executor: Arc<dyn TransformExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn resolver(&self) -> &ObjectResolver {
        &self.resolver
    }

    /// Resolve a request path and fetch its bytes
    pub async fn fetch_path(&self, path: &str) -> StorageResult<Bytes> {
        let object = self.resolver.resolve(path)?;
        self.fetch(&object).await
    }

    pub async fn fetch(&self, object: &ObjectDescriptor) -> StorageResult<Bytes> {
        let storage = self.storage_for(&object.storage).await?;

        match storage.get(&object.key).await {
            Err(StorageError::NotFound(key)) if object.has_transform() => {
                let Some(executor) = self.executor.as_ref() else {
                    return Err(StorageError::NotFound(key));
                };
                self.generate(object, storage.as_ref(), executor.as_ref())
                    .await
            }
            other => other,
        }
    }

    async fn generate(
        &self,
        object: &ObjectDescriptor,
        target: &dyn Storage,
        executor: &dyn TransformExecutor,
    ) -> StorageResult<Bytes> {
        let parent = self.resolver.resolve_parent(object)?;
        let parent_storage = self.storage_for(&parent.storage).await?;
        let original = parent_storage.get(&parent.key).await?;

        tracing::debug!(
            key = %object.key,
            parent = %parent.key,
            steps = object.transforms.steps.len(),
            "Generating derived object"
        );

        let derived = executor
            .execute(original, &object.transforms)
            .await
            .map_err(|e| StorageError::TransformFailed(format!("{:#}", e)))?;

        target.put(&object.key, derived.clone()).await?;
        Ok(derived)
    }

    /// Storage clients are created once per distinct configuration entry
    async fn storage_for(&self, config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
        let mut storages = self.storages.lock().await;
        if let Some(storage) = storages.get(config) {
            return Ok(Arc::clone(storage));
        }

        let storage = create_storage(config).await?;
        storages.insert(config.clone(), Arc::clone(&storage));
        Ok(storage)
    }
}
