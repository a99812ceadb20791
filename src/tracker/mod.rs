//! Issue-tracker access layer
//!
//! Resolves a fix commit to the files the ticket reports as affected and
//! the earliest release version impacted. The engine only depends on the
//! [IssueTracker] trait; implementations:
//!
//! - [local::LocalTracker]: offline stand-in derived from the commit itself
//! - [mock::MockTracker]: scripted reports for tests

pub mod local;
pub mod mock;

pub use local::LocalTracker;
pub use mock::MockTracker;

use crate::error::Result;
use crate::vcs::CommitDelta;
use chrono::NaiveDate;

/// What the tracker reports for one resolved fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    /// File paths the ticket marks as affected
    pub affected_files: Vec<String>,
    /// Date of the earliest affected release version, when known
    pub earliest_affected: Option<NaiveDate>,
}

/// Resolves fix commits against the issue tracker.
pub trait IssueTracker: Send + Sync {
    /// The tracker's report for a fix commit, or `None` when the commit
    /// resolves to no ticket.
    fn resolve_fix(&self, delta: &CommitDelta) -> Result<Option<FixReport>>;
}
