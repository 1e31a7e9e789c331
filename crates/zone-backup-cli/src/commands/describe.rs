use std::collections::BTreeMap;

use anyhow::Result;
use tracing::info;

use zone_backup_core::storage::create_backend;
use zone_backup_core::ZoneSnapshot;

use super::{load_config, load_snapshot, OutputFormat};

pub async fn run(config_path: &str, snapshot_key: &str, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path).await?;
    let storage = create_backend(&config.storage)?;

    info!("Fetching snapshot: {}", snapshot_key);
    let snapshot = load_snapshot(storage.as_ref(), snapshot_key).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", String::from_utf8_lossy(&snapshot.to_json()?));
        }
        OutputFormat::Text => print_snapshot_text(snapshot_key, &snapshot),
    }

    Ok(())
}

fn print_snapshot_text(key: &str, snapshot: &ZoneSnapshot) {
    println!("Snapshot:   {}", key);
    println!("Zone ID:    {}", snapshot.zone_id);
    println!("Zone name:  {}", snapshot.zone_name);
    match snapshot.captured_at {
        Some(ts) => println!("Captured:   {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Captured:   unknown"),
    }
    println!("Records:    {}", snapshot.records.len());

    let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in &snapshot.records {
        *by_type.entry(record.record_type.as_str()).or_default() += 1;
    }
    println!();
    println!("Record types:");
    for (record_type, count) in by_type {
        println!("  {:6} {}", record_type, count);
    }

    let apex = snapshot.apex_records_skipped();
    if apex > 0 {
        println!();
        println!("{} apex SOA/NS record(s) will be excluded on restore", apex);
    }
}
