use crate::error::{MinerError, Result};
use crate::vcs::{CommitDelta, TagRef, VcsReader};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Mock VCS reader for testing without a real repository.
///
/// Tags and the deltas for each release window are scripted up front;
/// `fail_deltas` makes every delta query fail to exercise the abort path.
pub struct MockVcs {
    tags: Vec<TagRef>,
    dates: HashMap<String, NaiveDate>,
    deltas: HashMap<(Option<String>, String), Vec<CommitDelta>>,
    fail_deltas: bool,
}

impl MockVcs {
    pub fn new() -> Self {
        MockVcs {
            tags: Vec::new(),
            dates: HashMap::new(),
            deltas: HashMap::new(),
            fail_deltas: false,
        }
    }

    /// Register a tag with its target commit id and release date.
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>, date: NaiveDate) {
        let name = name.into();
        self.dates.insert(name.clone(), date);
        self.tags.push(TagRef {
            name,
            target: target.into(),
        });
    }

    /// Script the deltas returned for one boundary pair.
    pub fn add_deltas(
        &mut self,
        from: Option<&str>,
        to: impl Into<String>,
        deltas: Vec<CommitDelta>,
    ) {
        self.deltas
            .insert((from.map(|s| s.to_string()), to.into()), deltas);
    }

    /// Make every subsequent delta query fail.
    pub fn fail_deltas(&mut self) {
        self.fail_deltas = true;
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsReader for MockVcs {
    fn release_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn tag_date(&self, tag: &TagRef) -> Result<NaiveDate> {
        self.dates
            .get(&tag.name)
            .copied()
            .ok_or_else(|| MinerError::retrieval(format!("Unknown tag: {}", tag.name)))
    }

    fn deltas_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitDelta>> {
        if self.fail_deltas {
            return Err(MinerError::retrieval("scripted delta failure"));
        }
        Ok(self
            .deltas
            .get(&(from.map(|s| s.to_string()), to.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
