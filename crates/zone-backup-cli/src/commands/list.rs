use anyhow::Result;
use tracing::info;

use zone_backup_core::storage::create_backend;

use super::load_config;

pub async fn run(config_path: &str, prefix: &str) -> Result<()> {
    let config = load_config(config_path).await?;
    let storage = create_backend(&config.storage)?;

    info!("Listing snapshots under prefix: '{}'", prefix);
    let mut keys = storage.list(prefix).await?;
    keys.retain(|k| k.ends_with(".json"));
    keys.sort();

    if keys.is_empty() {
        println!("No snapshots found under '{}'", prefix);
        return Ok(());
    }

    println!("Available snapshots:");
    for key in &keys {
        match storage.head(key).await {
            Ok(meta) => {
                let modified = chrono::DateTime::from_timestamp_millis(meta.last_modified)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("  {}  ({} bytes, {})", key, meta.size, modified);
            }
            Err(_) => println!("  {}", key),
        }
    }

    Ok(())
}
