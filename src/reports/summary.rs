//! Compact terminal summary of a scored assessment.

use crate::error::Result;
use crate::model::{MaturityLevel, DEFINED_THRESHOLD};
use crate::scoring::{AssessmentResults, ExternalAnalysis, Priority};

use super::{fmt_score, ReportFormat, ReportGenerator};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Shell-friendly summary output.
#[derive(Debug, Clone, Default)]
pub struct SummaryReporter {
    use_color: bool,
}

impl SummaryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self { use_color: true }
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    fn color_for(&self, score: f64) -> &'static str {
        if !self.use_color {
            return "";
        }
        if score >= 4.0 {
            GREEN
        } else if score >= DEFINED_THRESHOLD {
            YELLOW
        } else {
            RED
        }
    }

    fn reset(&self) -> &'static str {
        if self.use_color {
            RESET
        } else {
            ""
        }
    }

    fn bold(&self) -> &'static str {
        if self.use_color {
            BOLD
        } else {
            ""
        }
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        results: &AssessmentResults,
        analysis: Option<&ExternalAnalysis>,
    ) -> Result<String> {
        let mut lines = Vec::new();
        let reset = self.reset();

        let org = if results.metadata.organization.is_empty() {
            "Unknown Organization"
        } else {
            &results.metadata.organization
        };
        lines.push(format!(
            "{}DEBMM Assessment: {}{}",
            self.bold(),
            org,
            reset
        ));
        lines.push(String::new());

        match results.overall_score {
            Some(score) => {
                let level = MaturityLevel::from_score(score);
                lines.push(format!(
                    "Overall Score: {}{}/5.0 ({}){}",
                    self.color_for(score),
                    fmt_score(score),
                    level.name(),
                    reset
                ));
            }
            None => lines.push("Overall Score: N/A".to_string()),
        }
        lines.push(format!(
            "Achieved Tier: {}{}{}",
            self.bold(),
            results.tier_determination.tier_name,
            reset
        ));
        lines.push(String::new());

        lines.push("Tier Scores:".to_string());
        let name_width = results
            .tier_scores
            .values()
            .map(|t| t.name.len())
            .max()
            .unwrap_or(0);
        for tier in results.tier_scores.values() {
            match tier.score {
                Some(score) => lines.push(format!(
                    "  {:<name_width$}  {}{}/5.0{}",
                    tier.name,
                    self.color_for(score),
                    fmt_score(score),
                    reset
                )),
                None => lines.push(format!("  {:<name_width$}  N/A", tier.name)),
            }
        }
        lines.push(String::new());

        lines.push(format!(
            "Questions Scored: {}/{}",
            results.scored_count, results.question_count
        ));
        if results.needs_review_count > 0 {
            lines.push(format!(
                "Pending Review:   {}",
                results.needs_review_count
            ));
        }
        if results.issue_count > 0 {
            lines.push(format!(
                "{}Issues:           {}{}",
                if self.use_color { YELLOW } else { "" },
                results.issue_count,
                reset
            ));
        }
        if results.analysis_applied {
            lines.push("AI analysis:      applied".to_string());
        }
        lines.push(String::new());

        if !results.recommendations.is_empty() {
            lines.push("Top Recommendations:".to_string());
            for rec in results.recommendations.iter().take(5) {
                let indicator = match (self.use_color, rec.priority) {
                    (true, Priority::High) => "\x1b[31m[high]\x1b[0m",
                    (true, Priority::Medium) => "\x1b[33m[medium]\x1b[0m",
                    (false, Priority::High) => "[high]",
                    (false, Priority::Medium) => "[medium]",
                };
                lines.push(format!(
                    "  {} {} ({}): {} at {}/5.0",
                    indicator,
                    rec.criterion,
                    rec.tier,
                    rec.current_level,
                    fmt_score(rec.current_score)
                ));
            }
            lines.push(String::new());
        }

        if let Some(analysis) = analysis {
            if !analysis.inconsistencies.is_empty() {
                lines.push(format!(
                    "Inconsistencies found: {}",
                    analysis.inconsistencies.len()
                ));
                lines.push(String::new());
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
