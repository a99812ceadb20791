//! Core domain types: releases, the release timeline, tag patterns, and
//! the per-file metric accumulator.

pub mod class_state;
pub mod release;
pub mod timeline;
pub mod version_pattern;

pub use class_state::ClassState;
pub use release::Release;
pub use timeline::ReleaseTimeline;
pub use version_pattern::VersionPattern;
