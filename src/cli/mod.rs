//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs. Each handler implements the business logic for a specific CLI
//! subcommand and returns the desired process exit code.

#[cfg(feature = "analysis")]
mod analyze;
mod score;
mod validate;

#[cfg(feature = "analysis")]
pub use analyze::run_analyze;
pub use score::run_score;
pub use validate::run_validate;

// Re-export config types used by handlers
pub use crate::config::{AnalysisConfig, ScoreConfig};
