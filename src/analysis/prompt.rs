//! Prompt assembly and response parsing for LLM-assisted scoring.

use crate::error::{AnalysisErrorKind, AssessmentError, Result};
use crate::model::{AnswerValue, Questionnaire, Rubric};
use crate::scoring::{AssessmentResults, ExternalAnalysis};

/// Render a concise rubric summary the model can score against.
#[must_use]
pub fn build_rubric_context(rubric: &Rubric) -> String {
    let mut lines = vec!["# DEBMM Rubric Summary".to_string(), String::new()];
    lines.push("Maturity Levels: 1=Initial, 2=Repeatable, 3=Defined, 4=Managed, 5=Optimized".to_string());
    lines.push(String::new());

    for tier in &rubric.tiers {
        lines.push(format!("## {}", tier.name));
        for criterion in &tier.criteria {
            lines.push(format!("### {} (id: {})", criterion.name, criterion.id));
            for (level, descriptor) in &criterion.levels {
                lines.push(format!("  Level {}: {}", level, descriptor.qualitative.trim()));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
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

/// Build the full analysis prompt: rubric context, current automated scores,
/// the text answers awaiting review, and the required reply shape.
#[must_use]
pub fn build_analysis_prompt(
    results: &AssessmentResults,
    rubric_context: &str,
    questionnaire: &Questionnaire,
) -> String {
    let mut prompt = format!(
        "You are an expert detection engineering assessor evaluating an organization's \
         maturity using the DEBMM (Detection Engineering Behavior Maturity Model).\n\n\
         {rubric_context}\n\n\
         ## Current Automated Scores\n\n\
         The following scores were calculated from checklist and scale answers:\n\n"
    );

    for criterion in results.criteria() {
        if let Some(score) = criterion.score {
            let level = criterion.level_name.map_or("N/A", |l| l.name());
            prompt.push_str(&format!("- {}: {}/5.0 ({})\n", criterion.name, score, level));
        }
    }

    prompt.push_str(
        "\n## Text Answers to Score\n\n\
         The following text answers need to be scored on the 1-5 maturity scale. \
         For each answer, assess the maturity level described and provide a brief \
         justification.\n\n",
    );

    for item in &results.needs_review {
        let question_text = questionnaire
            .question(&item.id)
            .map_or("Unknown question", |q| q.question.as_str());
        prompt.push_str(&format!(
            "### {} - {}\n**Question**: {}\n**Answer**: {}\n\n",
            item.id,
            item.criterion,
            question_text,
            answer_text(item.answer.as_ref())
        ));
    }

    prompt.push_str(
        r#"## Your Task

Respond with a JSON object containing exactly these fields:

1. "text_scores": Array of objects, one per text answer above, each with:
   - "id": The question ID (e.g., "T0-Q10")
   - "criterion": The criterion ID
   - "score": Integer 1-5 based on the rubric levels
   - "justification": 1-2 sentence explanation of why this score

2. "inconsistencies": Array of strings describing any inconsistencies between the checklist/scale answers and the text answers. For example, if someone rates themselves as "Defined" on a scale question but their text answer describes Initial-level practices. Empty array if none found.

3. "improvement_plan": A markdown-formatted improvement plan with specific, actionable recommendations organized by priority. Focus on the lowest-scoring areas first, especially in foundational tiers. Include concrete next steps the team can take.

Respond ONLY with the JSON object, no other text."#,
    );

    prompt
}

/// Parse the model's reply into an [`ExternalAnalysis`].
///
/// Models sometimes wrap the JSON object in a markdown code fence even when
/// told not to, so fences are stripped before parsing.
pub fn parse_analysis_response(text: &str) -> Result<ExternalAnalysis> {
    let mut body = text.trim();
    if body.starts_with("```") {
        body = body
            .strip_prefix("```json")
            .or_else(|| body.strip_prefix("```"))
            .unwrap_or(body);
        body = body.strip_suffix("```").unwrap_or(body);
        body = body.trim();
    }

    serde_json::from_str(body).map_err(|e| {
        AssessmentError::analysis(
            "parsing analysis response",
            AnalysisErrorKind::InvalidResponse(e.to_string()),
        )
    })
}
