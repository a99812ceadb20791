use crate::domain::{ReleaseTimeline, VersionPattern};
use crate::error::Result;
use crate::mining::ProjectState;
use crate::tracker::IssueTracker;
use crate::vcs::{FixClassifier, Git2Vcs, VcsReader};
use std::path::Path;

/// Factory and orchestrator for one project's mining run.
///
/// Binds the VCS reader and issue tracker, builds the release timeline
/// from the repository's tags (admitted and canonicalized through the
/// tag pattern), and hands out [ProjectState] walkers.
pub struct RepositoryMiner {
    vcs: Box<dyn VcsReader>,
    tracker: Box<dyn IssueTracker>,
    timeline: ReleaseTimeline,
    /// Diff boundary per release, aligned with timeline ranks
    boundaries: Vec<String>,
}

impl RepositoryMiner {
    /// Clone-or-open the repository and assemble the miner.
    pub fn new<P: AsRef<Path>>(
        repo_path: P,
        git_url: &str,
        tracker_key: Option<&str>,
        tag_pattern: &VersionPattern,
        tracker: Box<dyn IssueTracker>,
    ) -> Result<Self> {
        let classifier = FixClassifier::new(tracker_key)?;
        let vcs = Git2Vcs::clone_or_open(repo_path, git_url, classifier)?;
        Self::with_collaborators(Box::new(vcs), tracker, tag_pattern)
    }

    /// Assemble the miner over arbitrary collaborators (tests use mocks).
    pub fn with_collaborators(
        vcs: Box<dyn VcsReader>,
        tracker: Box<dyn IssueTracker>,
        tag_pattern: &VersionPattern,
    ) -> Result<Self> {
        let mut timeline = ReleaseTimeline::new();
        let mut dated_targets = Vec::new();

        for tag in vcs.release_tags()? {
            let name = match tag_pattern.name_of(&tag.name) {
                Some(name) => name,
                None => continue,
            };
            let date = vcs.tag_date(&tag)?;
            timeline.insert(name.clone(), None, date);
            dated_targets.push((date, name, tag.target));
        }

        // Align diff boundaries with the timeline's rank order. Duplicate
        // (date, name) keys collapsed on insert keep their first target.
        let mut boundaries = Vec::with_capacity(timeline.len());
        for release in timeline.iter() {
            let target = dated_targets
                .iter()
                .find(|(date, name, _)| *date == release.date && *name == release.name)
                .map(|(_, _, target)| target.clone())
                .unwrap_or_default();
            boundaries.push(target);
        }

        Ok(RepositoryMiner {
            vcs,
            tracker,
            timeline,
            boundaries,
        })
    }

    pub fn timeline(&self) -> &ReleaseTimeline {
        &self.timeline
    }

    /// A fresh walker positioned before the first release.
    ///
    /// The export cutoff is the first half of the timeline (rounded up):
    /// early releases are exported unconditionally to bootstrap the
    /// dataset, later ones only when buggy.
    pub fn project_state(&self) -> ProjectState<'_> {
        ProjectState::new(
            self.timeline.clone(),
            self.boundaries.clone(),
            self.timeline.len().div_ceil(2),
            self.vcs.as_ref(),
            self.tracker.as_ref(),
        )
    }
}
