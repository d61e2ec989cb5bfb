//! Configuration type definitions.

use crate::reports::ReportFormat;
use std::path::PathBuf;

/// Default rubric location relative to the working directory.
pub const DEFAULT_RUBRIC: &str = "rubric/rubric.yaml";
/// Default questionnaire location relative to the working directory.
pub const DEFAULT_QUESTIONNAIRE: &str = "questionnaire/questionnaire.yaml";

/// Configuration for the `score` command.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub response_path: PathBuf,
    pub rubric_path: PathBuf,
    pub questionnaire_path: PathBuf,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    /// Also save full JSON results here
    pub json_out: Option<PathBuf>,
    /// Fail (exit 1) when the overall score is below this
    pub min_score: Option<f64>,
    pub no_color: bool,
    pub quiet: bool,
}

impl ScoreConfig {
    #[must_use]
    pub fn new(response_path: PathBuf) -> Self {
        Self {
            response_path,
            rubric_path: PathBuf::from(DEFAULT_RUBRIC),
            questionnaire_path: PathBuf::from(DEFAULT_QUESTIONNAIRE),
            output: ReportFormat::Auto,
            output_file: None,
            json_out: None,
            min_score: None,
            no_color: false,
            quiet: false,
        }
    }
}

/// Configuration for the `analyze` command.
#[cfg(feature = "analysis")]
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub score: ScoreConfig,
    pub provider: crate::analysis::Provider,
    /// Model name; the provider default when absent
    pub model: Option<String>,
    /// Save the raw analysis JSON here
    pub analysis_json_out: Option<PathBuf>,
    /// Print the prompt instead of calling the API
    pub dry_run: bool,
}

#[cfg(not(feature = "analysis"))]
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub score: ScoreConfig,
}
