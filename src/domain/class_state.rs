use crate::vcs::ChangedFile;
use std::collections::HashSet;

/// Mutable accumulator of evolution metrics for one file, valid as of the
/// release the engine is currently positioned on.
///
/// Created the first time a file shows up in any revision and carried
/// forward for the rest of the walk; a file deleted from the repository
/// keeps its state (it still belongs to the dataset for the releases where
/// it existed).
#[derive(Debug, Clone)]
pub struct ClassState {
    path: String,
    loc: u64,
    touched_loc: u64,
    revisions: u64,
    fixes: u64,
    authors: HashSet<String>,
    added_loc: u64,
    max_added_loc: u64,
    churn: u64,
    max_churn: u64,
    changed_file_set: u64,
    max_changed_file_set: u64,
    age: u64,
    weighted_sum: f64,
    buggy: bool,
}

impl ClassState {
    pub fn new(path: impl Into<String>) -> Self {
        ClassState {
            path: path.into(),
            loc: 0,
            touched_loc: 0,
            revisions: 0,
            fixes: 0,
            authors: HashSet::new(),
            added_loc: 0,
            max_added_loc: 0,
            churn: 0,
            max_churn: 0,
            changed_file_set: 0,
            max_changed_file_set: 0,
            age: 0,
            weighted_sum: 0.0,
            buggy: false,
        }
    }

    /// Fold one revision touching this file into the running metrics.
    ///
    /// `commit_file_count` is the total number of files in the commit; the
    /// change-set contribution counts the files changed *together with*
    /// this one. A fix revision resets the age clock.
    pub fn record_revision(
        &mut self,
        change: &ChangedFile,
        author: &str,
        commit_file_count: usize,
        is_fix: bool,
    ) {
        let rev_churn = change.added + change.deleted;

        self.loc = change.loc;
        self.touched_loc += rev_churn;
        self.revisions += 1;
        if is_fix {
            self.fixes += 1;
        }
        self.authors.insert(author.to_string());

        self.added_loc += change.added;
        self.max_added_loc = self.max_added_loc.max(change.added);

        self.churn += rev_churn;
        self.max_churn = self.max_churn.max(rev_churn);

        let co_changed = commit_file_count.saturating_sub(1) as u64;
        self.changed_file_set += co_changed;
        self.max_changed_file_set = self.max_changed_file_set.max(co_changed);

        // Churn-weighted recency: each revision contributes its age at the
        // time of the revision, weighted by its share of total churn.
        self.weighted_sum += self.age as f64 * rev_churn as f64;

        if is_fix {
            self.age = 0;
        }
    }

    /// Advance the age clock by one release-interval. Called once per
    /// timeline step for every file already known; files with no revisions
    /// in the window keep everything else verbatim.
    pub fn advance_release(&mut self) {
        self.age += 1;
    }

    /// Label this file as known-buggy. The label never retracts.
    pub fn mark_buggy(&mut self) {
        self.buggy = true;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn loc(&self) -> u64 {
        self.loc
    }

    pub fn touched_loc(&self) -> u64 {
        self.touched_loc
    }

    pub fn revisions(&self) -> u64 {
        self.revisions
    }

    pub fn fixes(&self) -> u64 {
        self.fixes
    }

    pub fn authors(&self) -> u64 {
        self.authors.len() as u64
    }

    pub fn added_loc(&self) -> u64 {
        self.added_loc
    }

    pub fn max_added_loc(&self) -> u64 {
        self.max_added_loc
    }

    pub fn avg_added_loc(&self) -> f64 {
        Self::ratio(self.added_loc, self.revisions)
    }

    pub fn churn(&self) -> u64 {
        self.churn
    }

    pub fn max_churn(&self) -> u64 {
        self.max_churn
    }

    pub fn avg_churn(&self) -> f64 {
        Self::ratio(self.churn, self.revisions)
    }

    pub fn changed_file_set(&self) -> u64 {
        self.changed_file_set
    }

    pub fn max_changed_file_set(&self) -> u64 {
        self.max_changed_file_set
    }

    pub fn avg_changed_file_set(&self) -> f64 {
        Self::ratio(self.changed_file_set, self.revisions)
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    /// Churn-weighted mean of the age at each revision:
    /// `sum(age_i * churn_i) / total_churn`, 0 while no churn accumulated.
    pub fn weighted_age(&self) -> f64 {
        if self.churn == 0 {
            0.0
        } else {
            self.weighted_sum / self.churn as f64
        }
    }

    pub fn buggy(&self) -> bool {
        self.buggy
    }

    fn ratio(total: u64, count: u64) -> f64 {
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}
