use crate::error::{MinerError, Result};
use regex::Regex;

/// Matches raw tag strings against a project's tag naming convention and
/// extracts the canonical version name from the `name` capture group.
///
/// The pattern must match the *entire* tag for a tag to be admitted.
#[derive(Debug, Clone)]
pub struct VersionPattern {
    pattern: Regex,
}

impl VersionPattern {
    /// Compile a tag pattern. The regex must contain a named capture
    /// group called `name`.
    pub fn new(regex: &str) -> Result<Self> {
        let pattern = Regex::new(regex)
            .map_err(|e| MinerError::config(format!("Invalid tag pattern '{}': {}", regex, e)))?;

        if !pattern.capture_names().flatten().any(|n| n == "name") {
            return Err(MinerError::config(format!(
                "Tag pattern '{}' is missing the 'name' capture group",
                regex
            )));
        }

        Ok(VersionPattern { pattern })
    }

    /// True iff the whole tag string matches the pattern.
    pub fn matches(&self, tag: &str) -> bool {
        self.whole_match(tag).is_some()
    }

    /// The canonical version name captured from the tag, or `None`
    /// when the tag does not fully match.
    pub fn name_of(&self, tag: &str) -> Option<String> {
        self.whole_match(tag)
            .and_then(|c| c.name("name"))
            .map(|m| m.as_str().to_string())
    }

    fn whole_match<'t>(&self, tag: &'t str) -> Option<regex::Captures<'t>> {
        self.pattern
            .captures(tag)
            .filter(|c| c.get(0).map(|m| m.as_str() == tag).unwrap_or(false))
    }
}
