//! Restore reconciliation pipeline.
//!
//! Stages run strictly in order: domain validation → health-check
//! validation → categorization → batch planning → execution. Each stage
//! consumes the previous stage's full output; fatal and recoverable
//! failures are distinguished in the type signatures rather than by
//! control flow.

pub mod diff;
pub mod engine;
pub mod plan;
pub mod report;
pub mod validate;

pub use diff::{categorize, PlannedAction, PlannedChange};
pub use engine::{RestoreEngine, RestoreOptions, RestorePlan, RetryPolicy};
pub use plan::{build_change_batches, ChangeBatch};
pub use report::{
    ActionCounts, ApplyReport, ConflictEntry, MissingHealthCheck, PreflightReport, RestoreOutcome,
};
pub use validate::{find_missing_health_checks, validate_domain};
