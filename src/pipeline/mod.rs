//! Pipeline orchestration for assessment operations.
//!
//! Shared load -> score -> report plumbing so the CLI command handlers stay
//! small.

mod load;
mod output;

pub use load::{load_questionnaire, load_response, load_rubric, LoadedAssessment};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Overall score fell below the --min-score threshold
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
