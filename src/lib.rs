pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod mining;
pub mod tracker;
pub mod ui;
pub mod vcs;

pub use error::{MinerError, Result};
