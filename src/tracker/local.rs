use crate::error::Result;
use crate::tracker::{FixReport, IssueTracker};
use crate::vcs::CommitDelta;

/// Offline tracker stand-in.
///
/// Without a reachable tracker instance, the best available estimate is
/// the fix commit itself: the affected files are the files the fix
/// touches, and the defect is assumed present from the fix date backwards.
/// A networked client would implement [IssueTracker] with real ticket
/// lookups and drop in unchanged.
#[derive(Debug, Clone, Default)]
pub struct LocalTracker;

impl LocalTracker {
    pub fn new() -> Self {
        LocalTracker
    }
}

impl IssueTracker for LocalTracker {
    fn resolve_fix(&self, delta: &CommitDelta) -> Result<Option<FixReport>> {
        if !delta.is_fix {
            return Ok(None);
        }

        Ok(Some(FixReport {
            affected_files: delta.files.iter().map(|f| f.path.clone()).collect(),
            earliest_affected: Some(delta.date),
        }))
    }
}
