//! Unit tests for zone-backup-core.
//!
//! These tests exercise pure functions and data structures without I/O.

pub mod diff;
pub mod helpers;
pub mod plan;
pub mod wire;
