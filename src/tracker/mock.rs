use crate::error::{MinerError, Result};
use crate::tracker::{FixReport, IssueTracker};
use crate::vcs::CommitDelta;
use std::collections::HashMap;

/// Mock tracker with reports scripted per commit id.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    reports: HashMap<String, FixReport>,
    fail: bool,
}

impl MockTracker {
    pub fn new() -> Self {
        MockTracker {
            reports: HashMap::new(),
            fail: false,
        }
    }

    pub fn add_report(&mut self, commit_id: impl Into<String>, report: FixReport) {
        self.reports.insert(commit_id.into(), report);
    }

    /// Make every subsequent resolution fail.
    pub fn fail(&mut self) {
        self.fail = true;
    }
}

impl IssueTracker for MockTracker {
    fn resolve_fix(&self, delta: &CommitDelta) -> Result<Option<FixReport>> {
        if self.fail {
            return Err(MinerError::tracker("scripted tracker failure"));
        }
        Ok(self.reports.get(&delta.id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn delta(id: &str) -> CommitDelta {
        CommitDelta {
            id: id.to_string(),
            author: "alice".to_string(),
            message: "fix".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            is_fix: true,
            files: vec![],
        }
    }

    #[test]
    fn test_scripted_report_lookup() {
        let mut tracker = MockTracker::new();
        tracker.add_report(
            "c1",
            FixReport {
                affected_files: vec!["src/Foo.java".to_string()],
                earliest_affected: None,
            },
        );

        assert!(tracker.resolve_fix(&delta("c1")).unwrap().is_some());
        assert!(tracker.resolve_fix(&delta("c2")).unwrap().is_none());
    }

    #[test]
    fn test_failure_injection() {
        let mut tracker = MockTracker::new();
        tracker.fail();
        assert!(tracker.resolve_fix(&delta("c1")).is_err());
    }
}
