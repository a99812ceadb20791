use crate::domain::{ClassState, Release, ReleaseTimeline};
use crate::error::Result;
use crate::tracker::IssueTracker;
use crate::vcs::VcsReader;
use std::collections::BTreeMap;

/// The stepping engine: advances release-by-release through the timeline
/// and folds each window's commit deltas into per-file [ClassState].
///
/// The file map is owned exclusively by this struct and mutated only
/// inside [ProjectState::next]; between steps callers get read-only
/// views valid for the current cursor position. Releases are processed
/// strictly in ascending rank order — each release's metrics depend on
/// the running totals of all prior releases.
pub struct ProjectState<'a> {
    timeline: ReleaseTimeline,
    /// Diff boundary (commit id) per release, aligned with timeline ranks
    boundaries: Vec<String>,
    cursor: usize,
    num_release_to_process: usize,
    states: BTreeMap<String, ClassState>,
    vcs: &'a dyn VcsReader,
    tracker: &'a dyn IssueTracker,
}

impl<'a> ProjectState<'a> {
    pub fn new(
        timeline: ReleaseTimeline,
        boundaries: Vec<String>,
        num_release_to_process: usize,
        vcs: &'a dyn VcsReader,
        tracker: &'a dyn IssueTracker,
    ) -> Self {
        debug_assert_eq!(timeline.len(), boundaries.len());
        ProjectState {
            timeline,
            boundaries,
            cursor: 0,
            num_release_to_process,
            states: BTreeMap::new(),
            vcs,
            tracker,
        }
    }

    /// Consume the next release: pull the commit deltas between the
    /// previous release boundary (or the repository root for the first
    /// release) and this one, update every touched file's state, and
    /// resolve fix commits against the tracker.
    ///
    /// Returns `Ok(false)` once the timeline is exhausted. Collaborator
    /// errors propagate unchanged and abort this project's walk; there is
    /// no retry.
    pub fn next(&mut self) -> Result<bool> {
        if self.cursor >= self.timeline.len() {
            return Ok(false);
        }

        let to = self.boundaries[self.cursor].clone();
        let from = self
            .cursor
            .checked_sub(1)
            .map(|i| self.boundaries[i].clone());

        let deltas = self.vcs.deltas_between(from.as_deref(), &to)?;

        // Every file known from earlier releases ages by one interval,
        // whether or not this window touches it.
        for state in self.states.values_mut() {
            state.advance_release();
        }
        self.cursor += 1;

        for delta in &deltas {
            let commit_file_count = delta.files.len();
            for file in &delta.files {
                let state = self
                    .states
                    .entry(file.path.clone())
                    .or_insert_with(|| ClassState::new(&file.path));
                state.record_revision(file, &delta.author, commit_file_count, delta.is_fix);
            }

            if delta.is_fix {
                if let Some(report) = self.tracker.resolve_fix(delta)? {
                    if self.affects_current_release(report.earliest_affected) {
                        for path in &report.affected_files {
                            if let Some(state) = self.states.get_mut(path) {
                                state.mark_buggy();
                            }
                        }
                    }
                }
            }
        }

        Ok(true)
    }

    /// True when the earliest affected version sits at or before the
    /// release currently being processed.
    fn affects_current_release(&self, earliest_affected: Option<chrono::NaiveDate>) -> bool {
        match earliest_affected {
            Some(date) => match self.timeline.next_on_or_after(date) {
                Some(release) => self
                    .timeline
                    .rank_of(release)
                    .map(|rank| rank <= self.cursor)
                    .unwrap_or(false),
                // Affected version past the end of the timeline
                None => false,
            },
            // No version info from the tracker: take the report at face value
            None => true,
        }
    }

    /// File paths known as of the current cursor.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(|s| s.as_str())
    }

    /// State of one file as of the current cursor.
    pub fn state(&self, path: &str) -> Option<&ClassState> {
        self.states.get(path)
    }

    /// Current 1-based release rank; 0 before the first `next()`.
    pub fn version(&self) -> usize {
        self.cursor
    }

    /// The release the cursor is on, if stepping has started.
    pub fn release(&self) -> Option<&Release> {
        self.timeline.get(self.cursor)
    }

    /// Rank cutoff below which releases are exported unconditionally.
    pub fn num_release_to_process(&self) -> usize {
        self.num_release_to_process
    }
}
