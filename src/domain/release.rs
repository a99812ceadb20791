use chrono::NaiveDate;
use std::cmp::Ordering;

/// A tagged, dated version of the project under study.
///
/// Identity is `(date, name)`; the tracker id is carried along but does
/// not participate in ordering (synthetic releases have no tracker id).
/// Rank within the timeline is derived from position, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub id: Option<String>,
    pub date: NaiveDate,
}

impl Release {
    pub fn new(name: impl Into<String>, id: Option<String>, date: NaiveDate) -> Self {
        Release {
            name: name.into(),
            id,
            date,
        }
    }

    /// Ordering key: release date, then name as a deterministic tie-break
    /// so two releases on the same day still compare unequal.
    pub fn key(&self) -> (NaiveDate, &str) {
        (self.date, &self.name)
    }
}

impl Ord for Release {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Release {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
