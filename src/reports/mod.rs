//! Report generation for assessment results.
//!
//! This module provides multiple output formats for scored assessments:
//! - JSON: Structured data for programmatic integration
//! - Markdown: Human-readable assessment report
//! - Summary: Compact shell-friendly output

mod json;
mod markdown;
mod summary;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;

use crate::scoring::{AssessmentResults, ExternalAnalysis};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Auto-detect: summary on a TTY, JSON otherwise
    #[default]
    Auto,
    /// Brief colored terminal summary
    Summary,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown report
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Render the results (and any external analysis) to a string.
    fn generate(
        &self,
        results: &AssessmentResults,
        analysis: Option<&ExternalAnalysis>,
    ) -> crate::error::Result<String>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format with color control.
///
/// `Auto` must be resolved to a concrete format by the caller before this
/// point; here it falls back to the summary reporter.
#[must_use]
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

/// Format a 2-decimal score the way the documents store it: one decimal
/// when the second is zero (`3.5`), two otherwise (`3.33`).
#[must_use]
pub(crate) fn fmt_score(value: f64) -> String {
    let two = format!("{value:.2}");
    if two.ends_with('0') {
        format!("{value:.1}")
    } else {
        two
    }
}
