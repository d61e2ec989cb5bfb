//! Validate command handler.
//!
//! Structural validation of a rubric/questionnaire pair beyond what loading
//! already enforces: cross-references from questions to criteria and tiers,
//! duplicate question ids, unrecognized question types, and checklist
//! questions relying on the implicit yes score.

use crate::model::{Questionnaire, QuestionType, Rubric};
use crate::pipeline::{exit_codes, load_questionnaire, load_rubric, write_output, OutputTarget};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub question: String,
    pub message: String,
}

/// Cross-reference a questionnaire against a rubric.
fn check_cross_references(rubric: &Rubric, questionnaire: &Questionnaire) -> Vec<Finding> {
    let index = rubric.criterion_index();
    let tier_ids: HashSet<&str> = rubric.tiers.iter().map(|t| t.id.as_str()).collect();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut findings = Vec::new();

    for question in &questionnaire.questions {
        if !seen_ids.insert(question.id.as_str()) {
            findings.push(Finding {
                question: question.id.clone(),
                message: "Duplicate question id".to_string(),
            });
        }

        if let QuestionType::Unknown(tag) = &question.question_type {
            findings.push(Finding {
                question: question.id.clone(),
                message: format!("Unrecognized question type '{tag}'"),
            });
        }

        if question.question_type == QuestionType::Checklist
            && question.scoring.yes_value.is_none()
        {
            findings.push(Finding {
                question: question.id.clone(),
                message: "Checklist question has no scoring.yes_value; \
                          a yes answer will score the default 3.0"
                    .to_string(),
            });
        }

        if !tier_ids.contains(question.tier.as_str()) {
            findings.push(Finding {
                question: question.id.clone(),
                message: format!("References unknown tier '{}'", question.tier),
            });
        }

        match index.get(&question.criterion) {
            None => findings.push(Finding {
                question: question.id.clone(),
                message: format!("References unknown criterion '{}'", question.criterion),
            }),
            Some(info) if info.tier_id != question.tier => findings.push(Finding {
                question: question.id.clone(),
                message: format!(
                    "Criterion '{}' belongs to tier '{}', not '{}'",
                    question.criterion, info.tier_id, question.tier
                ),
            }),
            Some(_) => {}
        }
    }

    findings
}

/// Run the validate command, returning the desired exit code.
pub fn run_validate(
    rubric_path: PathBuf,
    questionnaire_path: PathBuf,
    json: bool,
    output_file: Option<PathBuf>,
) -> Result<i32> {
    let rubric = load_rubric(&rubric_path)?;
    let questionnaire = load_questionnaire(&questionnaire_path)?;

    let findings = check_cross_references(&rubric, &questionnaire);

    let output = if json {
        serde_json::to_string_pretty(&serde_json::json!({
            "tool": "debmm-tools",
            "version": env!("CARGO_PKG_VERSION"),
            "rubric": rubric_path.display().to_string(),
            "questionnaire": questionnaire_path.display().to_string(),
            "valid": findings.is_empty(),
            "findings": findings,
        }))?
    } else if findings.is_empty() {
        format!(
            "OK: {} questions reference {} criteria across {} tiers",
            questionnaire.questions.len(),
            rubric.criterion_count(),
            rubric.tiers.len()
        )
    } else {
        let mut lines = vec![format!("{} finding(s):", findings.len())];
        for finding in &findings {
            lines.push(format!("  {}: {}", finding.question, finding.message));
        }
        lines.join("\n")
    };

    write_output(&output, &OutputTarget::from_option(output_file), false)?;

    if findings.is_empty() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::BELOW_THRESHOLD)
    }
}
