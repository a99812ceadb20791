use crate::error::{MinerError, Result};
use crate::vcs::{ChangedFile, CommitDelta, FixClassifier, TagRef, VcsReader};
use chrono::NaiveDate;
use git2::{Commit, Oid, Patch, Repository as Git2Repo};
use std::path::Path;

/// VCS reader backed by git2, with clone-or-open semantics.
pub struct Git2Vcs {
    repo: Git2Repo,
    fix_classifier: FixClassifier,
}

impl Git2Vcs {
    /// Open the repository at `path`, cloning it from `url` first when the
    /// directory does not exist yet. An already-present clone is reused.
    pub fn clone_or_open<P: AsRef<Path>>(
        path: P,
        url: &str,
        fix_classifier: FixClassifier,
    ) -> Result<Self> {
        let path = path.as_ref();
        let repo = if path.exists() {
            Git2Repo::open(path)?
        } else {
            Git2Repo::clone(url, path)
                .map_err(|e| MinerError::retrieval(format!("Cannot clone '{}': {}", url, e)))?
        };

        Ok(Git2Vcs {
            repo,
            fix_classifier,
        })
    }

    /// Wrap an already-open local repository (used by the tests).
    pub fn open<P: AsRef<Path>>(path: P, fix_classifier: FixClassifier) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Vcs {
            repo,
            fix_classifier,
        })
    }

    fn commit_date(commit: &Commit) -> NaiveDate {
        chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
            .map(|dt| dt.date_naive())
            .unwrap_or(NaiveDate::MIN)
    }

    fn blob_line_count(&self, oid: Oid) -> u64 {
        if oid.is_zero() {
            return 0;
        }
        match self.repo.find_blob(oid) {
            Ok(blob) if !blob.is_binary() => {
                blob.content().iter().filter(|&&b| b == b'\n').count() as u64
            }
            _ => 0,
        }
    }

    fn delta_for(&self, commit: &Commit) -> Result<CommitDelta> {
        let tree = commit.tree()?;
        // First parent only; a root commit is diffed against the empty
        // tree so its full content counts as additions.
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => Oid::from_str(crate::vcs::EMPTY_TREE_ID)
                .ok()
                .and_then(|oid| self.repo.find_tree(oid).ok()),
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut files = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            if path.is_empty() {
                continue;
            }

            let (added, deleted) = match Patch::from_diff(&diff, idx)? {
                Some(patch) => {
                    let (_, additions, deletions) = patch.line_stats()?;
                    (additions as u64, deletions as u64)
                }
                None => (0, 0),
            };

            files.push(ChangedFile {
                path,
                added,
                deleted,
                loc: self.blob_line_count(delta.new_file().id()),
            });
        }

        let message = commit.message().unwrap_or("").to_string();
        let is_fix = self.fix_classifier.is_fix(&message);

        Ok(CommitDelta {
            id: commit.id().to_string(),
            author: commit.author().name().unwrap_or("unknown").to_string(),
            message,
            date: Self::commit_date(commit),
            is_fix,
            files,
        })
    }
}

impl VcsReader for Git2Vcs {
    fn release_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let name = match reference.name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            // Peel through annotated tags down to the commit
            let target = reference
                .peel_to_commit()
                .map_err(|e| MinerError::retrieval(format!("Cannot peel tag '{}': {}", name, e)))?
                .id()
                .to_string();

            tags.push(TagRef { name, target });
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn tag_date(&self, tag: &TagRef) -> Result<NaiveDate> {
        let oid = Oid::from_str(&tag.target)?;
        let commit = self.repo.find_commit(oid)?;
        Ok(Self::commit_date(&commit))
    }

    fn deltas_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitDelta>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(Oid::from_str(to)?)?;
        if let Some(from) = from {
            revwalk.hide(Oid::from_str(from)?)?;
        }

        let mut deltas = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            deltas.push(self.delta_for(&commit)?);
        }

        // Revwalk yields newest first; the engine folds oldest first
        deltas.reverse();
        Ok(deltas)
    }
}

// SAFETY: Git2Vcs wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Vcs {}
