//! Version-control access layer
//!
//! The mining engine never talks to git directly; it goes through the
//! [VcsReader] trait, which exposes release tags and commit-by-commit
//! file diffs between two boundaries. Implementations:
//!
//! - [repository::Git2Vcs]: the real thing, backed by the `git2` crate
//! - [mock::MockVcs]: an in-memory script of deltas for tests

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::error::{MinerError, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Hash of git's well-known empty tree; diffing the first commit against
/// it yields the full initial content as additions.
pub const EMPTY_TREE_ID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// A tag admitted as a potential release boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Full reference name, e.g. `refs/tags/4.1.0`
    pub name: String,
    /// Target commit id (hex)
    pub target: String,
}

/// One file touched by a commit, with line-level diff stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub added: u64,
    pub deleted: u64,
    /// Line count of the file as of this commit (0 once deleted)
    pub loc: u64,
}

/// One commit's worth of change data, classified as fix or regular.
///
/// Fix vs. regular is a flag, not a subtype: the only behavioral
/// difference downstream is whether tracker resolution runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDelta {
    pub id: String,
    pub author: String,
    pub message: String,
    pub date: NaiveDate,
    pub is_fix: bool,
    pub files: Vec<ChangedFile>,
}

/// Classifies commits as fix commits from their message.
///
/// Matches common defect keywords plus, when a tracker project key is
/// known, explicit ticket references like `BOOKKEEPER-123`.
#[derive(Debug, Clone)]
pub struct FixClassifier {
    pattern: Regex,
}

impl FixClassifier {
    pub fn new(tracker_key: Option<&str>) -> Result<Self> {
        let base = r"(?i)\bfix(es|ed)?\b|\bbug\b|\bdefect\b";
        let source = match tracker_key {
            Some(key) if !key.is_empty() => {
                format!("{}|{}-[0-9]+", base, regex::escape(key))
            }
            _ => base.to_string(),
        };
        let pattern = Regex::new(&source)
            .map_err(|e| MinerError::config(format!("Invalid fix pattern: {}", e)))?;
        Ok(FixClassifier { pattern })
    }

    pub fn is_fix(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}

/// Read-side VCS operations needed by the mining engine.
///
/// All implementors must be `Send + Sync`. Methods return
/// [crate::error::Result]; implementations map underlying errors (like
/// `git2::Error`) to [crate::error::MinerError] variants.
pub trait VcsReader: Send + Sync {
    /// All tag references in the repository with their target commits.
    fn release_tags(&self) -> Result<Vec<TagRef>>;

    /// Commit date of a tag's target, used to place the release on the
    /// timeline.
    fn tag_date(&self, tag: &TagRef) -> Result<NaiveDate>;

    /// Per-commit file diffs between two boundaries, oldest first.
    ///
    /// `from` is exclusive; `None` means the repository root, so the very
    /// first commit is diffed against the empty tree and its whole content
    /// shows up as additions. `to` is inclusive.
    fn deltas_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitDelta>>;
}
