//! Configuration for assessment commands.
//!
//! Type-safe configuration structures with validation, assembled from CLI
//! arguments by the command handlers.

mod types;
mod validation;

pub use types::{AnalysisConfig, ScoreConfig, DEFAULT_QUESTIONNAIRE, DEFAULT_RUBRIC};
pub use validation::{ConfigError, Validatable};
