//! Subcommand implementations and shared CLI plumbing.

use anyhow::{Context, Result};
use serde::Deserialize;

use zone_backup_core::restore::{PlannedAction, PreflightReport};
use zone_backup_core::storage::StorageBackendConfig;
use zone_backup_core::{Error, RecordStoreConfig, RetryPolicy, StorageBackend, ZoneSnapshot};

pub mod describe;
pub mod list;
pub mod preflight;
pub mod restore;

/// Top-level configuration file, YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Snapshot blob storage
    pub storage: StorageBackendConfig,

    /// DNS record store to restore into
    #[serde(default = "default_record_store")]
    pub record_store: RecordStoreConfig,

    /// Retry behavior for throttled change batches
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_record_store() -> RecordStoreConfig {
    RecordStoreConfig::File {
        path: "zone-state.json".into(),
    }
}

pub async fn load_config(path: &str) -> Result<CliConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading configuration file {}", path))?;
    let config: CliConfig =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing configuration {}", path))?;
    Ok(config)
}

/// Fetch and parse a snapshot document from blob storage.
pub async fn load_snapshot(storage: &dyn StorageBackend, key: &str) -> Result<ZoneSnapshot> {
    let data = storage.get(key).await.map_err(|e| match e {
        Error::Storage(zone_backup_core::StorageError::NotFound(_)) => {
            Error::SnapshotNotFound(key.to_string())
        }
        other => other,
    })?;
    Ok(ZoneSnapshot::from_slice(&data)?)
}

/// Command output format
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Render a preflight report the way an operator reads it: per-record
/// lines for everything that would be written or flagged, then totals.
pub fn print_preflight_text(report: &PreflightReport) {
    println!("Restore plan for zone {} ({})", report.zone_id, report.zone_name);
    println!();

    for change in &report.changes {
        match change.action {
            PlannedAction::SkipIdentical => {}
            _ => {
                let marker = if change.conflict { " [conflict]" } else { "" };
                println!(
                    "  {:26} {}{}  ({})",
                    change.action.as_str(),
                    change.display_name(),
                    marker,
                    change.reason
                );
            }
        }
    }

    if !report.missing_health_checks.is_empty() {
        println!();
        println!("Missing health checks:");
        for missing in &report.missing_health_checks {
            println!("  {} referenced by:", missing.id);
            for record in &missing.records {
                println!("    - {}", record);
            }
        }
    }

    println!();
    println!(
        "  CREATE: {}  UPSERT: {}  SKIP_IDENTICAL: {}  SKIP_MISSING_HEALTH_CHECK: {}",
        report.counts.create,
        report.counts.upsert,
        report.counts.skip_identical,
        report.counts.skip_missing_health_check
    );
    if report.apex_records_skipped > 0 {
        println!(
            "  {} apex SOA/NS record(s) excluded from the plan",
            report.apex_records_skipped
        );
    }
    println!(
        "  {} write(s) across {} batch(es)",
        report.counts.writes(),
        report.batches_planned
    );
}
