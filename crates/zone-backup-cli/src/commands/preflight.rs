use anyhow::Result;
use tracing::info;

use zone_backup_core::restore::{RestoreEngine, RestoreOptions};
use zone_backup_core::{create_record_store, storage::create_backend};

use super::{load_config, load_snapshot, print_preflight_text, OutputFormat};

pub async fn run(
    config_path: &str,
    snapshot_key: &str,
    zone_id: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path).await?;

    let storage = create_backend(&config.storage)?;
    info!("Fetching snapshot: {}", snapshot_key);
    let snapshot = load_snapshot(storage.as_ref(), snapshot_key).await?;

    let store = create_record_store(&config.record_store).await?;
    let engine = RestoreEngine::new(store);

    let options = RestoreOptions {
        target_zone_id: zone_id.map(str::to_string),
        dry_run: true,
        ..Default::default()
    };
    let report = engine.preflight(&snapshot, &options).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_preflight_text(&report),
    }

    Ok(())
}
