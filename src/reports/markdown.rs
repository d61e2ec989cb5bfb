//! Markdown assessment report.

use crate::error::Result;
use crate::model::{AnswerValue, MaturityLevel};
use crate::scoring::{AssessmentResults, ExternalAnalysis, Priority, Recommendation};
use std::fmt::Write;

use super::{fmt_score, ReportFormat, ReportGenerator};

/// Renders the full human-readable assessment report.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn opt_score(score: Option<f64>) -> String {
    score.map_or_else(|| "N/A".to_string(), |s| format!("{}/5.0", fmt_score(s)))
}

fn level_name(score: Option<f64>) -> &'static str {
    score.map_or("N/A", |s| MaturityLevel::from_score(s).name())
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn answer_text(answer: Option<&AnswerValue>) -> String {
    match answer {
        Some(AnswerValue::Text(s)) => s.clone(),
        Some(AnswerValue::Bool(b)) => b.to_string(),
        Some(AnswerValue::Int(n)) => n.to_string(),
        Some(AnswerValue::Float(f)) => f.to_string(),
        Some(AnswerValue::Null) | None => "(no answer)".to_string(),
    }
}

fn push_recommendations(out: &mut String, recs: &[&Recommendation]) {
    for rec in recs {
        let _ = writeln!(
            out,
            "- **{}** ({}): Currently at {} ({}/5.0). {}",
            rec.criterion,
            rec.tier,
            rec.current_level,
            fmt_score(rec.current_score),
            rec.recommendation
        );
    }
    out.push('\n');
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        results: &AssessmentResults,
        analysis: Option<&ExternalAnalysis>,
    ) -> Result<String> {
        let meta = &results.metadata;
        let org = if meta.organization.is_empty() {
            "Unknown Organization"
        } else {
            &meta.organization
        };
        let assessor = if meta.assessor_name.is_empty() {
            "Unknown"
        } else {
            &meta.assessor_name
        };
        let date = if meta.date.is_empty() {
            chrono::Local::now().format("%Y-%m-%d").to_string()
        } else {
            meta.date.clone()
        };
        let assessment_type = if meta.assessment_type.is_empty() {
            "Self".to_string()
        } else {
            title_case(&meta.assessment_type)
        };
        let overall = results
            .overall_score
            .map_or_else(|| "N/A".to_string(), fmt_score);
        let tier = &results.tier_determination;

        let mut out = String::new();
        out.push_str("# DEBMM Assessment Report\n\n");
        out.push_str("| | |\n|---|---|\n");
        let _ = writeln!(out, "| **Organization** | {org} |");
        let _ = writeln!(out, "| **Assessor** | {assessor} |");
        let _ = writeln!(out, "| **Date** | {date} |");
        let _ = writeln!(out, "| **Assessment Type** | {assessment_type} |");
        let _ = writeln!(out, "| **Overall Score** | **{overall}/5.0** |");
        let _ = writeln!(out, "| **Achieved Tier** | **{}** |", tier.tier_name);
        out.push('\n');

        out.push_str("## Executive Summary\n\n");
        let _ = writeln!(out, "- **Overall Maturity Score**: {overall}/5.0");
        let _ = writeln!(out, "- **Achieved Tier**: {}", tier.tier_name);
        let _ = writeln!(out, "- {}", tier.description);
        let _ = writeln!(
            out,
            "- **Questions Scored**: {}/{}",
            results.scored_count, results.question_count
        );
        let _ = writeln!(
            out,
            "- **Text Answers Pending Review**: {}",
            results.needs_review_count
        );
        if results.issue_count > 0 {
            let _ = writeln!(
                out,
                "- **Issues (unanswered/invalid)**: {}",
                results.issue_count
            );
        }
        out.push('\n');

        out.push_str("### Maturity Overview\n\n");
        out.push_str("| Category | Score | Level |\n|----------|-------|-------|\n");
        for tier_score in results.tier_scores.values() {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                tier_score.name,
                opt_score(tier_score.score),
                level_name(tier_score.score)
            );
        }
        out.push('\n');

        out.push_str("---\n\n## Detailed Results\n\n");
        for tier_score in results.tier_scores.values() {
            let _ = writeln!(
                out,
                "### {} - {}\n",
                tier_score.name,
                opt_score(tier_score.score)
            );
            out.push_str("| Criterion | Score | Level | Questions Scored | Pending Review |\n");
            out.push_str("|-----------|-------|-------|-----------------|----------------|\n");
            for criterion in tier_score.criteria.values() {
                let score = criterion
                    .score
                    .map_or_else(|| "N/A".to_string(), fmt_score);
                let level = criterion
                    .score
                    .and(criterion.level_name)
                    .map_or("N/A", |l| l.name());
                let review = if criterion.needs_review_count > 0 {
                    criterion.needs_review_count.to_string()
                } else {
                    "-".to_string()
                };
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {}/{} | {} |",
                    criterion.name,
                    score,
                    level,
                    criterion.scored_count,
                    criterion.total_count,
                    review
                );
            }
            out.push('\n');
        }

        if !results.recommendations.is_empty() {
            out.push_str("---\n\n## Recommendations\n\n");
            out.push_str(
                "The following criteria scored below Defined (3.0) and should be \
                 prioritized for improvement:\n\n",
            );

            let high: Vec<_> = results
                .recommendations
                .iter()
                .filter(|r| r.priority == Priority::High)
                .collect();
            let medium: Vec<_> = results
                .recommendations
                .iter()
                .filter(|r| r.priority == Priority::Medium)
                .collect();

            if !high.is_empty() {
                out.push_str("### High Priority (Foundation & Basic Tiers)\n\n");
                push_recommendations(&mut out, &high);
            }
            if !medium.is_empty() {
                out.push_str("### Medium Priority (Intermediate & Above)\n\n");
                push_recommendations(&mut out, &medium);
            }
        }

        if let Some(analysis) = analysis {
            out.push_str("---\n\n## AI-Assisted Analysis\n\n");

            if !analysis.text_scores.is_empty() {
                out.push_str("### Text Answer Scores\n\n");
                out.push_str("| Question | Score | Justification |\n");
                out.push_str("|----------|-------|---------------|\n");
                for ts in &analysis.text_scores {
                    let _ = writeln!(
                        out,
                        "| {} | {}/5 | {} |",
                        ts.id,
                        fmt_score(ts.score),
                        ts.justification.as_deref().unwrap_or("-")
                    );
                }
                out.push('\n');
            }

            if !analysis.inconsistencies.is_empty() {
                out.push_str("### Identified Inconsistencies\n\n");
                for item in &analysis.inconsistencies {
                    let _ = writeln!(out, "- {item}");
                }
                out.push('\n');
            }

            if !analysis.improvement_plan.is_empty() {
                out.push_str("### Improvement Recommendations\n\n");
                out.push_str(&analysis.improvement_plan);
                out.push('\n');
            }
        }

        if !results.needs_review.is_empty() {
            out.push_str("---\n\n## Items Requiring Manual Review\n\n");
            out.push_str(
                "The following text answers could not be automatically scored and \
                 require human evaluation:\n\n",
            );
            for item in &results.needs_review {
                let _ = writeln!(out, "### {} ({})\n", item.id, item.criterion);
                let _ = writeln!(out, "> {}\n", answer_text(item.answer.as_ref()));
            }
        }

        if !results.issues.is_empty() {
            out.push_str("---\n\n## Issues\n\n");
            for issue in &results.issues {
                let status = title_case(&issue.status.as_str().replace('_', " "));
                match &issue.error {
                    Some(error) => {
                        let _ = writeln!(out, "- **{}**: {} - {}", issue.id, status, error);
                    }
                    None => {
                        let _ = writeln!(out, "- **{}**: {}", issue.id, status);
                    }
                }
            }
            out.push('\n');
        }

        out.push_str("---\n\n");
        out.push_str(
            "*Generated by debmm-tools. \
             Based on [Elastic's DEBMM](https://www.elastic.co/security-labs/elastic-releases-debmm) \
             with enrichment from [detectionengineering.io](https://detectionengineering.io/).*\n",
        );

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
