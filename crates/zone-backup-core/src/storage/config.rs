//! Storage backend configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot storage backend selection.
///
/// Deserialized from the CLI's YAML config file; the `type` tag picks the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageBackendConfig {
    /// AWS S3 or S3-compatible object storage
    S3 {
        bucket: String,

        #[serde(default)]
        region: Option<String>,

        /// Custom endpoint for S3-compatible services (MinIO, Ceph RGW)
        #[serde(default)]
        endpoint: Option<String>,

        #[serde(default)]
        access_key: Option<String>,

        #[serde(default)]
        secret_key: Option<String>,

        /// Key prefix applied to all operations
        #[serde(default)]
        prefix: Option<String>,

        /// Allow plain-HTTP endpoints (local MinIO)
        #[serde(default)]
        allow_http: bool,
    },

    /// Local filesystem storage
    Filesystem { path: PathBuf },

    /// In-memory storage (testing only)
    Memory,
}

impl Default for StorageBackendConfig {
    fn default() -> Self {
        StorageBackendConfig::Filesystem {
            path: PathBuf::from("."),
        }
    }
}
