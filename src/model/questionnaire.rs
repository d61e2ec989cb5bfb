//! Questionnaire data model: questions mapped onto rubric criteria/tiers.

use serde::{Deserialize, Serialize};

/// Question type, determining which answer shapes are admissible and how
/// they score.
///
/// Unknown tags are preserved rather than rejected at load time: a bad type
/// string is a rubric-authoring defect that should surface as an
/// `unknown_type` status on the affected question, not abort the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionType {
    /// Binary yes/no, scored via the question's `yes_value` (no scores 1)
    Checklist,
    /// Ordinal 1-5 self-rating, taken directly as the score
    Scale,
    /// Free text, never auto-scored; flagged for external review
    Text,
    /// Unrecognized type tag, preserved for diagnostics
    Unknown(String),
}

impl QuestionType {
    /// The wire tag for this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Checklist => "checklist",
            Self::Scale => "scale",
            Self::Text => "text",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for QuestionType {
    fn from(tag: &str) -> Self {
        match tag {
            "checklist" => Self::Checklist,
            "scale" => Self::Scale,
            "text" => Self::Text,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for QuestionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}

/// Type-specific scoring metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringMeta {
    /// Score awarded for a "yes" on a checklist question ("no" always
    /// scores 1, the Initial floor)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes_value: Option<f64>,
}

/// One question of the assessment questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Owning tier id
    pub tier: String,
    /// Owning criterion id
    pub criterion: String,
    /// The question text shown to the respondent
    pub question: String,
    /// Alternative phrasing used in audited (third-party) assessments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_audit: Option<String>,
    /// Answer options for scale questions, used by form renderers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub scoring: ScoringMeta,
}

impl Question {
    /// The checklist "yes" score for this question, defaulting to the
    /// Defined threshold when the rubric author omitted it.
    #[must_use]
    pub fn yes_value(&self) -> f64 {
        self.scoring.yes_value.unwrap_or(3.0)
    }
}

/// The full questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Parse a questionnaire from YAML.
    pub fn from_yaml_str(content: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Look up a question definition by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
