//! Storage backend trait definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Metadata about a stored snapshot object
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp (epoch milliseconds)
    pub last_modified: i64,
}

/// Trait for snapshot blob storage backends.
///
/// The restore side only ever reads; `put` exists so tests and external
/// exporters can seed storage through the same interface.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write data to a key
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Read data from a key
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// List keys with a given prefix
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Get object metadata (size, last modified)
    async fn head(&self, key: &str) -> Result<ObjectMetadata>;
}
