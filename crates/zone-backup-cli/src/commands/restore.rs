use anyhow::Result;
use tracing::{info, warn};

use zone_backup_core::restore::{RestoreEngine, RestoreOptions};
use zone_backup_core::{create_record_store, storage::create_backend};

use super::{load_config, load_snapshot, print_preflight_text};

pub async fn run(
    config_path: &str,
    snapshot_key: &str,
    zone_id: Option<&str>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    info!("Loading configuration from: {}", config_path);
    let config = load_config(config_path).await?;

    let storage = create_backend(&config.storage)?;
    info!("Fetching snapshot: {}", snapshot_key);
    let snapshot = load_snapshot(storage.as_ref(), snapshot_key).await?;

    let store = create_record_store(&config.record_store).await?;
    let engine = RestoreEngine::new(store).with_retry_policy(config.retry.clone());

    let options = RestoreOptions {
        target_zone_id: zone_id.map(str::to_string),
        dry_run,
        ..Default::default()
    };

    let plan = engine.plan(&snapshot, &options).await?;
    print_preflight_text(&plan.report);

    if !plan.report.has_writes() {
        println!();
        println!("Zone already matches the snapshot; nothing to apply.");
        return Ok(());
    }

    if dry_run {
        println!();
        println!("Dry run; no changes were applied.");
        return Ok(());
    }

    if !yes {
        println!();
        println!(
            "{} write(s) pending. Re-run with --yes to apply them.",
            plan.report.counts.writes()
        );
        return Ok(());
    }

    // Ctrl-C stops the run at the next batch boundary; applied batches stay.
    let shutdown = engine.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current batch");
            let _ = shutdown.send(());
        }
    });

    let report = engine.apply(&plan).await?;

    println!();
    if report.cancelled {
        println!(
            "Restore interrupted: {}/{} batches applied ({} changes) in {} ms",
            report.batches_applied, report.batches_total, report.changes_applied, report.duration_ms
        );
    } else {
        println!(
            "Restore complete: {} changes across {} batch(es) in {} ms",
            report.changes_applied, report.batches_applied, report.duration_ms
        );
    }
    for id in &report.change_ids {
        info!("Applied change batch: {}", id);
    }

    Ok(())
}
