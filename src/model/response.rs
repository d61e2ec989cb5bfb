//! Completed assessment response: metadata plus raw per-question answers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw answer value as it appears in the response document.
///
/// The admissible shape depends on the question type (boolean for
/// checklist, integer 1-5 for scale, string for text); shape checking is
/// the question scorer's job, not the deserializer's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl AnswerValue {
    /// The answer as an integral 1-5 scale value, if it is one.
    ///
    /// Accepts integer-valued floats (a YAML `4.0` is an admissible scale
    /// answer) but rejects fractional values.
    #[must_use]
    pub fn as_scale_value(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Short human-readable shape name for error messages.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "number",
            Self::Text(_) => "string",
            Self::Null => "null",
        }
    }
}

/// One response entry: the answer plus optional supporting evidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Who performed the assessment, when, and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub assessor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor_role: Option<String>,
    #[serde(default)]
    pub date: String,
    /// "self" or "audit"
    #[serde(default)]
    pub assessment_type: String,
    /// Any additional metadata fields pass through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// A completed assessment response document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentResponse {
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// Answers keyed by question id; absence of an entry means unanswered
    #[serde(default)]
    pub responses: IndexMap<String, ResponseEntry>,
}

impl AssessmentResponse {
    /// Parse a response document from YAML.
    pub fn from_yaml_str(content: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The raw answer for a question, if one was recorded.
    ///
    /// An entry with a `null` answer is treated the same as a missing
    /// entry: unanswered.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        match self.responses.get(question_id).and_then(|e| e.answer.as_ref()) {
            Some(AnswerValue::Null) | None => None,
            Some(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
metadata:
  organization: Example Corp
  assessor_name: Sam Analyst
  date: '2025-06-01'
  assessment_type: self
responses:
  T0-Q1:
    answer: true
    evidence: Runbook in the wiki
  T0-Q2:
    answer: 4
  T0-Q3:
    answer: 'We rotate triage duty weekly.'
  T0-Q4:
    answer: null
";

    #[test]
    fn test_parse_response() {
        let r = AssessmentResponse::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(r.metadata.organization, "Example Corp");
        assert_eq!(r.responses.len(), 4);
        assert_eq!(r.answer("T0-Q1"), Some(&AnswerValue::Bool(true)));
        assert_eq!(r.answer("T0-Q2"), Some(&AnswerValue::Int(4)));
    }

    #[test]
    fn test_null_answer_is_unanswered() {
        let r = AssessmentResponse::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(r.answer("T0-Q4"), None);
        assert_eq!(r.answer("T9-Q99"), None);
    }

    #[test]
    fn test_scale_value_coercion() {
        assert_eq!(AnswerValue::Int(4).as_scale_value(), Some(4));
        assert_eq!(AnswerValue::Float(4.0).as_scale_value(), Some(4));
        assert_eq!(AnswerValue::Float(3.5).as_scale_value(), None);
        assert_eq!(AnswerValue::Bool(true).as_scale_value(), None);
        assert_eq!(AnswerValue::Text("4".to_string()).as_scale_value(), None);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(AnswerValue::Bool(false).shape_name(), "boolean");
        assert_eq!(AnswerValue::Text(String::new()).shape_name(), "string");
    }
}
