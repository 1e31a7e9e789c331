//! Zone Backup Core Library
//!
//! This crate provides the core functionality for restoring DNS hosted
//! zones from snapshot documents stored in blob storage: snapshot
//! loading, validation, diff/categorization against the live zone,
//! change-batch planning and retry-aware execution.

pub mod error;
pub mod provider;
pub mod record;
pub mod restore;
pub mod snapshot;
pub mod storage;
pub mod zone;

pub use error::{Error, ProviderError, Result, StorageError};
pub use provider::{
    create_record_store, Change, ChangeAction, ChangeInfo, FileRecordStore, MemoryRecordStore,
    RecordStore, RecordStoreConfig, MAX_CHANGE_BATCH_SIZE,
};
pub use record::{
    AliasTarget, FailoverRole, GeoLocation, RecordData, RecordKey, RecordSet, RecordType,
    RoutingPolicy,
};
pub use restore::{
    ActionCounts, ApplyReport, PlannedAction, PlannedChange, PreflightReport, RestoreEngine,
    RestoreOptions, RestoreOutcome, RestorePlan, RetryPolicy,
};
pub use snapshot::ZoneSnapshot;
pub use storage::{create_backend, StorageBackend, StorageBackendConfig};
pub use zone::Zone;
