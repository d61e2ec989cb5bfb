//! **Scoring and reporting for detection engineering maturity assessments.**
//!
//! `debmm-tools` scores completed DEBMM (Detection Engineering Behavior
//! Maturity Model) questionnaires against a tiered rubric and turns the
//! results into reports. An assessment is three YAML documents: a rubric
//! (tiers of weighted criteria, each with 1-5 maturity level descriptors),
//! a questionnaire (checklist, scale, and free-text questions mapped to
//! criteria), and a completed response (answers plus assessor metadata).
//! The library powers both a command-line interface and programmatic use.
//!
//! ## Key Features
//!
//! - **Automated Scoring**: Checklist and scale answers become 1-5 scores;
//!   free-text answers are flagged for review rather than guessed at.
//! - **Weighted Aggregation**: Question scores roll up into criterion, tier,
//!   and overall scores with per-criterion weights, without ever coercing
//!   missing data to zero.
//! - **Tier Determination**: The achieved maturity tier is the longest
//!   prefix of the core tiers whose criteria all reach Defined (3.0).
//! - **Recommendations**: Criteria below Defined produce prioritized
//!   improvement guidance, foundational tiers first.
//! - **LLM-Assisted Analysis**: Text answers can be scored by an external
//!   model (Anthropic or OpenAI) and merged into the automated results.
//!   Requires the `analysis` feature flag.
//! - **Flexible Reporting**: JSON, Markdown, and colored terminal summary
//!   output.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The three input documents ([`Rubric`], [`Questionnaire`],
//!   [`AssessmentResponse`]) and the [`MaturityLevel`] scale.
//! - **[`scoring`]**: The engine. [`ScoringRun`] orchestrates per-question
//!   scoring, aggregation, tier determination, and recommendations into an
//!   [`AssessmentResults`] tree; `scoring::merge` folds external text scores
//!   into a new tree.
//! - **[`analysis`]**: Prompt construction and the blocking HTTP client for
//!   LLM-assisted scoring (feature `analysis`).
//! - **[`reports`]**: Report generators for each output format.
//! - **[`pipeline`]**: Document loading with path context, output targets,
//!   and CI exit codes.
//!
//! ## Getting Started: Scoring a Response
//!
//! ```no_run
//! use debmm_tools::pipeline::LoadedAssessment;
//! use debmm_tools::ScoringRun;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loaded = LoadedAssessment::load(
//!         Path::new("rubric/rubric.yaml"),
//!         Path::new("questionnaire/questionnaire.yaml"),
//!         Path::new("response.yaml"),
//!     )?;
//!
//!     let run = ScoringRun::new(&loaded.rubric, &loaded.questionnaire);
//!     let results = run.score(&loaded.response);
//!
//!     println!(
//!         "{}: overall {:?}, achieved {}",
//!         results.metadata.organization,
//!         results.overall_score,
//!         results.tier_determination.tier_name
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `analysis`: Enables the LLM analysis client and the `analyze`
//!   subcommand. This adds network dependencies like `reqwest`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores and counts move between f64 and integer level numbers freely;
    // all values are bounded to 1..=5 in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report rendering functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools
)]

#[cfg(feature = "analysis")]
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{AnalysisConfig, ConfigError, ScoreConfig, Validatable};
pub use error::{AssessmentError, ErrorContext, OptionContext, Result};
pub use model::{
    AssessmentResponse, CriterionIndex, MaturityLevel, Question, QuestionType, Questionnaire,
    Rubric, DEFINED_THRESHOLD,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{
    merge_external_scores, AssessmentResults, CriterionScore, ExternalAnalysis, QuestionScore,
    QuestionStatus, Recommendation, ScoringRun, TierDetermination, TierScore, TextScore,
};

#[cfg(feature = "analysis")]
pub use analysis::{LlmClient, LlmClientConfig, Provider};
