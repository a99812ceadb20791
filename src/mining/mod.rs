//! The mining engine: the release-by-release stepping walker and the
//! factory that wires it to a repository and tracker.

pub mod miner;
pub mod project_state;

pub use miner::RepositoryMiner;
pub use project_state::ProjectState;
