use crate::domain::release::Release;
use chrono::NaiveDate;

/// Ordered catalog of a project's releases.
///
/// Releases are held in a `Vec` kept sorted by `(date, name)`. The 1-based
/// rank of a release is its position in that order; it is derived on demand
/// rather than stored, so insertion never needs a renumber pass and the
/// rank invariant (ranks are exactly `1..=len()` with no gaps) holds by
/// construction. Date-bounded lookups are binary searches.
#[derive(Debug, Clone, Default)]
pub struct ReleaseTimeline {
    releases: Vec<Release>,
}

impl ReleaseTimeline {
    pub fn new() -> Self {
        ReleaseTimeline {
            releases: Vec::new(),
        }
    }

    /// Insert a release, keeping the catalog sorted. Inserting a release
    /// with an already-present `(date, name)` key is a no-op.
    pub fn insert(&mut self, name: impl Into<String>, id: Option<String>, date: NaiveDate) {
        let release = Release::new(name, id, date);
        match self
            .releases
            .binary_search_by(|r| r.key().cmp(&release.key()))
        {
            Ok(_) => {}
            Err(pos) => self.releases.insert(pos, release),
        }
    }

    /// The earliest release, or `None` when the timeline is empty.
    pub fn first(&self) -> Option<&Release> {
        self.releases.first()
    }

    /// The latest release, or `None` when the timeline is empty.
    pub fn last(&self) -> Option<&Release> {
        self.releases.last()
    }

    /// The release with the smallest date `>= date`, if any.
    pub fn next_on_or_after(&self, date: NaiveDate) -> Option<&Release> {
        let idx = self.releases.partition_point(|r| r.date < date);
        self.releases.get(idx)
    }

    /// The release with the largest date `<= date`, if any.
    pub fn last_on_or_before(&self, date: NaiveDate) -> Option<&Release> {
        let idx = self.releases.partition_point(|r| r.date <= date);
        idx.checked_sub(1).and_then(|i| self.releases.get(i))
    }

    /// The release at the given 1-based rank, if in range.
    pub fn get(&self, nth: usize) -> Option<&Release> {
        nth.checked_sub(1).and_then(|i| self.releases.get(i))
    }

    /// The current 1-based rank of a release, if present.
    pub fn rank_of(&self, release: &Release) -> Option<usize> {
        self.releases
            .binary_search_by(|r| r.key().cmp(&release.key()))
            .ok()
            .map(|i| i + 1)
    }

    /// Signed rank gap between the last release at or before `d1` and the
    /// next release at or after `d2`. Returns 0 when either bound does not
    /// resolve to a release. Callers pass `d1 <= d2` for a non-negative
    /// count of releases inside the window.
    pub fn count_between(&self, d1: NaiveDate, d2: NaiveDate) -> i64 {
        match (self.last_on_or_before(d1), self.next_on_or_after(d2)) {
            (Some(r1), Some(r2)) => {
                let rank1 = self.rank_of(r1).unwrap_or(0) as i64;
                let rank2 = self.rank_of(r2).unwrap_or(0) as i64;
                rank2 - rank1
            }
            _ => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Ascending-rank iteration. Restartable; `enumerate()` positions map
    /// to ranks `1..=len()`.
    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }
}

impl<'a> IntoIterator for &'a ReleaseTimeline {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.iter()
    }
}
