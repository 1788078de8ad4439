//! Mediagate Core Library
//!
//! This crate resolves request paths for the media object store into object
//! descriptors: bucket, storage key, storage backend, and, for derived objects,
//! the parent key and the transform pipeline to apply to it.

pub mod compiler;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod path;
pub mod resolver;
pub mod storage_types;

// Re-export commonly used types
pub use compiler::PresetCompiler;
pub use config::{AppConfig, BucketConfig, ConfigStore, TransformConfig};
pub use error::{ErrorMetadata, LogLevel, ResolveError};
pub use matcher::{RegexMatcher, TransformMatch, TransformMatcher};
pub use models::{ObjectDescriptor, StorageConfig, TransformPipeline, UriType};
pub use resolver::ObjectResolver;
pub use storage_types::StorageBackend;
