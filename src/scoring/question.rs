//! Per-question scoring.
//!
//! Converts one raw answer plus its question definition into a normalized
//! score or a status. Pure function of its inputs; no IO, no side effects.

use crate::model::{AnswerValue, Question, QuestionType};
use serde::{Deserialize, Serialize};

/// Outcome status of scoring a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// A numeric score was produced
    Scored,
    /// No answer was given (expected, not an error)
    Unanswered,
    /// Answer present but the wrong shape/range for its question type;
    /// a respondent error to fix before re-scoring
    Invalid,
    /// Text answer retained for external (manual or LLM) review
    NeedsReview,
    /// Question type tag not recognized; a questionnaire authoring defect,
    /// not a respondent error
    UnknownType,
}

impl QuestionStatus {
    /// The snake_case tag used in serialized results.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scored => "scored",
            Self::Unanswered => "unanswered",
            Self::Invalid => "invalid",
            Self::NeedsReview => "needs_review",
            Self::UnknownType => "unknown_type",
        }
    }
}

/// The score record for one question within a scoring run.
///
/// Computed once from exactly one question/answer pair and immutable
/// thereafter; the external-score merge produces derived criterion results
/// rather than rewriting these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScore {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub criterion: String,
    pub tier: String,
    pub score: Option<f64>,
    pub status: QuestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_answer: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuestionScore {
    fn new(question: &Question, status: QuestionStatus) -> Self {
        Self {
            id: question.id.clone(),
            question_type: question.question_type.as_str().to_string(),
            criterion: question.criterion.clone(),
            tier: question.tier.clone(),
            score: None,
            status,
            raw_answer: None,
            error: None,
        }
    }

    fn scored(question: &Question, score: f64, raw: &AnswerValue) -> Self {
        Self {
            score: Some(score),
            raw_answer: Some(raw.clone()),
            ..Self::new(question, QuestionStatus::Scored)
        }
    }

    fn invalid(question: &Question, raw: &AnswerValue, error: String) -> Self {
        Self {
            raw_answer: Some(raw.clone()),
            error: Some(error),
            ..Self::new(question, QuestionStatus::Invalid)
        }
    }
}

/// Score a single question response.
#[must_use]
pub fn score_question(question: &Question, answer: Option<&AnswerValue>) -> QuestionScore {
    let Some(answer) = answer else {
        return QuestionScore::new(question, QuestionStatus::Unanswered);
    };

    match &question.question_type {
        QuestionType::Checklist => match answer {
            AnswerValue::Bool(yes) => {
                let score = if *yes { question.yes_value() } else { 1.0 };
                QuestionScore::scored(question, score, answer)
            }
            other => QuestionScore::invalid(
                question,
                other,
                format!("Expected boolean, got {}", other.shape_name()),
            ),
        },
        QuestionType::Scale => match answer.as_scale_value() {
            Some(n) if (1..=5).contains(&n) => {
                QuestionScore::scored(question, n as f64, answer)
            }
            _ => QuestionScore::invalid(
                question,
                answer,
                "Expected integer in range 1-5".to_string(),
            ),
        },
        QuestionType::Text => match answer {
            AnswerValue::Text(text) if !text.trim().is_empty() => QuestionScore {
                raw_answer: Some(answer.clone()),
                ..QuestionScore::new(question, QuestionStatus::NeedsReview)
            },
            // Empty or whitespace-only text is simply unanswered
            _ => QuestionScore::new(question, QuestionStatus::Unanswered),
        },
        QuestionType::Unknown(tag) => {
            tracing::warn!(question = %question.id, r#type = %tag, "unknown question type");
            QuestionScore {
                raw_answer: Some(answer.clone()),
                ..QuestionScore::new(question, QuestionStatus::UnknownType)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScoringMeta;

    fn question(question_type: QuestionType, yes_value: Option<f64>) -> Question {
        Question {
            id: "T0-Q1".to_string(),
            question_type,
            tier: "tier_0".to_string(),
            criterion: "alert_triage".to_string(),
            question: "A question".to_string(),
            question_audit: None,
            options: Vec::new(),
            scoring: ScoringMeta { yes_value },
        }
    }

    #[test]
    fn test_absent_answer_is_unanswered_for_all_types() {
        for qt in [
            QuestionType::Checklist,
            QuestionType::Scale,
            QuestionType::Text,
            QuestionType::Unknown("ranked".to_string()),
        ] {
            let result = score_question(&question(qt, Some(4.0)), None);
            assert_eq!(result.status, QuestionStatus::Unanswered);
            assert_eq!(result.score, None);
        }
    }

    #[test]
    fn test_checklist_yes_scores_configured_value() {
        let q = question(QuestionType::Checklist, Some(4.0));
        let result = score_question(&q, Some(&AnswerValue::Bool(true)));
        assert_eq!(result.status, QuestionStatus::Scored);
        assert_eq!(result.score, Some(4.0));
    }

    #[test]
    fn test_checklist_no_scores_floor() {
        let q = question(QuestionType::Checklist, Some(4.0));
        let result = score_question(&q, Some(&AnswerValue::Bool(false)));
        assert_eq!(result.status, QuestionStatus::Scored);
        assert_eq!(result.score, Some(1.0));
    }

    #[test]
    fn test_checklist_string_answer_is_invalid() {
        let q = question(QuestionType::Checklist, Some(4.0));
        let result = score_question(&q, Some(&AnswerValue::Text("yes".to_string())));
        assert_eq!(result.status, QuestionStatus::Invalid);
        assert_eq!(result.score, None);
        assert!(result.error.unwrap().contains("boolean"));
    }

    #[test]
    fn test_scale_valid_range() {
        let q = question(QuestionType::Scale, None);
        for n in 1..=5 {
            let result = score_question(&q, Some(&AnswerValue::Int(n)));
            assert_eq!(result.status, QuestionStatus::Scored);
            assert_eq!(result.score, Some(n as f64));
        }
    }

    #[test]
    fn test_scale_integer_valued_float_accepted() {
        let q = question(QuestionType::Scale, None);
        let result = score_question(&q, Some(&AnswerValue::Float(3.0)));
        assert_eq!(result.status, QuestionStatus::Scored);
        assert_eq!(result.score, Some(3.0));
    }

    #[test]
    fn test_scale_out_of_range_is_invalid() {
        let q = question(QuestionType::Scale, None);
        for bad in [0, 6, -1] {
            let result = score_question(&q, Some(&AnswerValue::Int(bad)));
            assert_eq!(result.status, QuestionStatus::Invalid, "value {bad}");
            assert!(result.error.as_ref().unwrap().contains("1-5"));
        }
    }

    #[test]
    fn test_scale_fractional_is_invalid() {
        let q = question(QuestionType::Scale, None);
        let result = score_question(&q, Some(&AnswerValue::Float(3.5)));
        assert_eq!(result.status, QuestionStatus::Invalid);
    }

    #[test]
    fn test_text_with_content_needs_review() {
        let q = question(QuestionType::Text, None);
        let result = score_question(&q, Some(&AnswerValue::Text("We do X.".to_string())));
        assert_eq!(result.status, QuestionStatus::NeedsReview);
        assert_eq!(result.score, None);
        assert!(result.raw_answer.is_some());
    }

    #[test]
    fn test_text_whitespace_only_is_unanswered() {
        let q = question(QuestionType::Text, None);
        let result = score_question(&q, Some(&AnswerValue::Text("   \n".to_string())));
        assert_eq!(result.status, QuestionStatus::Unanswered);
        assert!(result.raw_answer.is_none());
    }

    #[test]
    fn test_unknown_type_status() {
        let q = question(QuestionType::Unknown("ranked".to_string()), None);
        let result = score_question(&q, Some(&AnswerValue::Int(3)));
        assert_eq!(result.status, QuestionStatus::UnknownType);
        assert_eq!(result.score, None);
    }

    #[test]
    fn test_determinism() {
        let q = question(QuestionType::Scale, None);
        let a = score_question(&q, Some(&AnswerValue::Int(4)));
        let b = score_question(&q, Some(&AnswerValue::Int(4)));
        assert_eq!(a.score, b.score);
        assert_eq!(a.status, b.status);
    }
}
