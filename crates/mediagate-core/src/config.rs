//! Configuration module
//!
//! Bucket definitions (transform pattern, presets, storages) are loaded from a
//! YAML file into an immutable [`AppConfig`] snapshot. Patterns are compiled once
//! at load time. [`ConfigStore`] hands snapshots to request workers and replaces
//! them atomically on reload.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use serde::Deserialize;

use crate::error::ResolveError;
use crate::matcher::{RegexMatcher, TransformMatcher};
use crate::models::{PresetDefinition, Storages};
use crate::path::SourceClassifier;

const DEFAULT_CONFIG_PATH: &str = "config/mediagate.yml";

/// Transform section of a bucket: the key pattern and the presets it can select
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    /// Pattern with two capture groups: preset name, parent suffix
    pub path: String,
    #[serde(default)]
    pub presets: HashMap<String, PresetDefinition>,
    #[serde(skip)]
    matcher: Option<Arc<dyn TransformMatcher>>,
}

impl TransformConfig {
    /// Build a transform section, compiling `path` as a regex
    pub fn new(
        path: impl Into<String>,
        presets: HashMap<String, PresetDefinition>,
    ) -> Result<Self, String> {
        let mut transform = TransformConfig {
            path: path.into(),
            presets,
            matcher: None,
        };
        transform.compile()?;
        Ok(transform)
    }

    /// Replace the matching engine
    pub fn with_matcher(mut self, matcher: Arc<dyn TransformMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    fn compile(&mut self) -> Result<(), String> {
        if self.matcher.is_none() {
            self.matcher = Some(Arc::new(RegexMatcher::new(&self.path)?));
        }
        Ok(())
    }

    /// Compiled matcher; `None` only for a section that was never compiled
    pub fn matcher(&self) -> Option<&dyn TransformMatcher> {
        self.matcher.as_deref()
    }

    pub fn preset(&self, name: &str) -> Option<&PresetDefinition> {
        self.presets.get(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketConfig {
    /// Buckets without a transform section only serve originals
    #[serde(default)]
    pub transform: Option<TransformConfig>,
    pub storages: Storages,
}

impl BucketConfig {
    pub fn new(storages: Storages) -> Self {
        BucketConfig {
            transform: None,
            storages,
        }
    }

    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = Some(transform);
        self
    }

    fn compile(&mut self) -> Result<(), String> {
        if let Some(ref mut transform) = self.transform {
            transform.compile()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.storages.validate()?;
        if let Some(ref transform) = self.transform {
            for (name, preset) in &transform.presets {
                preset
                    .validate()
                    .map_err(|e| format!("preset {}: {}", name, e))?;
            }
        }
        Ok(())
    }
}

/// On-disk shape of the configuration file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    local_pattern: Option<String>,
    #[serde(default)]
    buckets: HashMap<String, BucketConfig>,
}

/// Immutable configuration snapshot used by the resolver
#[derive(Debug, Clone)]
pub struct AppConfig {
    classifier: SourceClassifier,
    buckets: HashMap<String, BucketConfig>,
}

impl AppConfig {
    /// Build a snapshot from bucket definitions, compiling and validating them
    pub fn new(buckets: HashMap<String, BucketConfig>) -> Result<Self, anyhow::Error> {
        let mut config = AppConfig {
            classifier: SourceClassifier::default(),
            buckets,
        };
        for (name, bucket) in config.buckets.iter_mut() {
            bucket
                .compile()
                .map_err(|e| anyhow::anyhow!("Bucket {}: {}", name, e))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Override the local-namespace pattern
    pub fn with_local_pattern(mut self, pattern: &str) -> Result<Self, anyhow::Error> {
        self.classifier = SourceClassifier::new(pattern)
            .with_context(|| format!("Invalid local pattern {}", pattern))?;
        Ok(self)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, anyhow::Error> {
        let file: ConfigFile =
            serde_yaml::from_str(yaml).context("Failed to parse configuration")?;

        let config = Self::new(file.buckets)?;
        match file.local_pattern {
            Some(pattern) => config.with_local_pattern(&pattern),
            None => Ok(config),
        }
    }

    /// Load configuration from YAML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            buckets = config.buckets.len(),
            "Configuration loaded from file"
        );
        Ok(config)
    }

    /// Load configuration from the file named by `MEDIAGATE_CONFIG`
    ///
    /// `MEDIAGATE_LOCAL_PATTERN` overrides the file's local pattern.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let path =
            env::var("MEDIAGATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = Self::load_from_file(&path)?;

        match env::var("MEDIAGATE_LOCAL_PATTERN").ok().filter(|s| !s.is_empty()) {
            Some(pattern) => config.with_local_pattern(&pattern),
            None => Ok(config),
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (name, bucket) in &self.buckets {
            bucket
                .validate()
                .map_err(|e| anyhow::anyhow!("Bucket {}: {}", name, e))?;
        }
        Ok(())
    }

    /// Look up a bucket by name
    pub fn bucket(&self, name: &str) -> Result<&BucketConfig, ResolveError> {
        self.buckets
            .get(name)
            .ok_or_else(|| ResolveError::UnknownBucket(name.to_string()))
    }

    pub fn buckets(&self) -> &HashMap<String, BucketConfig> {
        &self.buckets
    }

    pub fn classifier(&self) -> &SourceClassifier {
        &self.classifier
    }

    pub fn local_pattern(&self) -> &str {
        self.classifier.pattern()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            classifier: SourceClassifier::default(),
            buckets: HashMap::new(),
        }
    }
}

/// Process-wide holder of the current configuration snapshot
///
/// Readers take an `Arc` and keep it for the whole resolution; `swap` installs a
/// new snapshot without disturbing resolutions already in flight.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<AppConfig>>,
}

impl ConfigStore {
    pub fn new(config: AppConfig) -> Self {
        ConfigStore {
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn snapshot(&self) -> Arc<AppConfig> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Install a new snapshot, returning the previous one
    pub fn swap(&self, config: AppConfig) -> Arc<AppConfig> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(&mut *guard, Arc::new(config));
        tracing::info!(
            buckets = guard.buckets.len(),
            "Configuration snapshot replaced"
        );
        previous
    }
}
