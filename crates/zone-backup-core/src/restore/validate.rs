//! Pre-apply validation stages.
//!
//! The domain check is fatal and runs before any further I/O; the
//! health-check scan is recoverable and only marks records for skipping.

use std::collections::{BTreeSet, HashSet};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::provider::RecordStore;
use crate::record::RecordSet;
use crate::snapshot::ZoneSnapshot;
use crate::zone::Zone;
use crate::{Error, Result};

/// Confirm the snapshot belongs to the target zone's domain.
///
/// Compared by canonical domain name, not zone id: restoring a public
/// zone's snapshot into a private zone of the same domain is legitimate,
/// restoring into a different domain never is.
pub fn validate_domain(snapshot: &ZoneSnapshot, zone: &Zone) -> Result<()> {
    let expected = snapshot.zone_name.trim_end_matches('.').to_ascii_lowercase();
    let actual = zone.domain();
    if expected != actual {
        return Err(Error::DomainMismatch { expected, actual });
    }
    Ok(())
}

/// Find health checks referenced by the snapshot that do not exist in the
/// target account.
///
/// Each distinct id is queried exactly once, regardless of how many
/// records reference it; lookups run concurrently and all complete before
/// categorization starts. A lookup failure (permissions, transport) is
/// logged and the health check treated as present, so an unrelated API
/// problem does not silently drop records from the plan.
pub async fn find_missing_health_checks(
    store: &dyn RecordStore,
    records: &[&RecordSet],
) -> HashSet<String> {
    // BTreeSet keeps lookup order deterministic.
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.health_check_id.as_deref())
        .collect();

    if distinct.is_empty() {
        return HashSet::new();
    }
    debug!("Validating {} distinct health check reference(s)", distinct.len());

    let lookups = distinct
        .iter()
        .map(|id| async move { (*id, store.health_check_exists(id).await) });

    let mut missing = HashSet::new();
    for (id, result) in join_all(lookups).await {
        match result {
            Ok(true) => {}
            Ok(false) => {
                missing.insert(id.to_string());
            }
            Err(e) => {
                warn!("Could not validate health check {}: {}", id, e);
            }
        }
    }

    missing
}
