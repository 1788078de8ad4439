//! Mediagate Storage Library
//!
//! This crate provides the storage abstraction and its S3 and local filesystem
//! implementations, plus the fetcher that serves resolved objects from them.
//!
//! # Storage key format
//!
//! Storages receive the bucket-relative keys of resolved objects (`/2024/pic.jpg`).
//! Keys must not contain `..` segments. Normalization is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod fetcher;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use fetcher::ObjectFetcher;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use mediagate_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, TransformExecutor};
