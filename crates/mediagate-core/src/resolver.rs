//! Object resolver
//!
//! Turns a raw request path into an [`ObjectDescriptor`]: classify the path,
//! decode bucket and key, look up the bucket, match the key against the bucket's
//! transform pattern, compile the selected preset and pick the storage. No I/O
//! happens here.

use std::sync::Arc;

use crate::compiler::PresetCompiler;
use crate::config::{AppConfig, BucketConfig};
use crate::error::ResolveError;
use crate::models::{ObjectDescriptor, TransformPipeline};
use crate::path::decode_path;

/// Resolves request paths against one configuration snapshot
#[derive(Debug, Clone)]
pub struct ObjectResolver {
    config: Arc<AppConfig>,
}

impl ObjectResolver {
    pub fn new(config: Arc<AppConfig>) -> Self {
        ObjectResolver { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve a raw request path
    pub fn resolve(&self, path: &str) -> Result<ObjectDescriptor, ResolveError> {
        let uri_type = self.config.classifier().classify(path);
        let decoded = decode_path(path)?;
        let bucket = self.config.bucket(&decoded.bucket)?;

        let (transforms, parent) = Self::decode_key(&decoded.bucket, bucket, &decoded.key);
        let storage = bucket.storages.select(transforms.not_empty).clone();

        tracing::debug!(
            uri = %path,
            uri_type = ?uri_type,
            bucket = %decoded.bucket,
            key = %decoded.key,
            parent = %parent,
            has_transform = transforms.not_empty,
            "Resolved object"
        );

        Ok(ObjectDescriptor {
            uri: path.to_string(),
            bucket: decoded.bucket,
            key: decoded.key,
            uri_type,
            parent,
            transforms,
            storage,
        })
    }

    /// Resolve the original a derived object is computed from
    ///
    /// Fails with `NoParent` for originals; errors from decoding the parent
    /// path are returned unchanged. The parent key is never matched against the
    /// transform pattern again, so derivation is exactly one level deep.
    pub fn resolve_parent(&self, object: &ObjectDescriptor) -> Result<ObjectDescriptor, ResolveError> {
        let parent_path = object
            .parent_path()
            .ok_or_else(|| ResolveError::NoParent(object.uri.clone()))?;

        let uri_type = self.config.classifier().classify(&parent_path);
        let decoded = decode_path(&parent_path)?;
        let bucket = self.config.bucket(&decoded.bucket)?;

        Ok(ObjectDescriptor {
            uri: parent_path,
            bucket: decoded.bucket,
            key: decoded.key,
            uri_type,
            parent: String::new(),
            transforms: TransformPipeline::new(),
            storage: bucket.storages.basic.clone(),
        })
    }

    /// Match the key against the bucket's pattern; returns the compiled pipeline
    /// and the parent key (empty when the key addresses an original)
    fn decode_key(
        bucket_name: &str,
        bucket: &BucketConfig,
        key: &str,
    ) -> (TransformPipeline, String) {
        let Some(transform) = bucket.transform.as_ref() else {
            return (TransformPipeline::new(), String::new());
        };
        let Some(found) = transform.matcher().and_then(|m| m.match_key(key)) else {
            return (TransformPipeline::new(), String::new());
        };

        let transforms = match transform.preset(&found.preset_name) {
            Some(preset) => PresetCompiler::compile(preset),
            None => {
                tracing::warn!(
                    bucket = %bucket_name,
                    key = %key,
                    preset = %found.preset_name,
                    "Key matched transform pattern but preset is not configured"
                );
                TransformPipeline::new()
            }
        };

        (transforms, found.parent_key())
    }
}
