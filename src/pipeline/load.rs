//! Loading the assessment input documents with path context.

use crate::model::{AssessmentResponse, Questionnaire, Rubric};
use anyhow::{Context, Result};
use std::path::Path;

/// The three documents a scoring run needs, loaded together.
pub struct LoadedAssessment {
    pub rubric: Rubric,
    pub questionnaire: Questionnaire,
    pub response: AssessmentResponse,
}

impl LoadedAssessment {
    /// Load and validate all three documents.
    pub fn load(
        rubric_path: &Path,
        questionnaire_path: &Path,
        response_path: &Path,
    ) -> Result<Self> {
        Ok(Self {
            rubric: load_rubric(rubric_path)?,
            questionnaire: load_questionnaire(questionnaire_path)?,
            response: load_response(response_path)?,
        })
    }
}

/// Load and validate a rubric with context for error messages.
pub fn load_rubric(path: &Path) -> Result<Rubric> {
    tracing::info!("Loading rubric: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rubric file: {}", path.display()))?;
    let rubric = Rubric::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse rubric: {}", path.display()))?;
    tracing::debug!(
        "Loaded {} tiers, {} criteria",
        rubric.tiers.len(),
        rubric.criterion_count()
    );
    Ok(rubric)
}

/// Load a questionnaire with context for error messages.
pub fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    tracing::info!("Loading questionnaire: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read questionnaire file: {}", path.display()))?;
    let questionnaire = Questionnaire::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse questionnaire: {}", path.display()))?;
    tracing::debug!("Loaded {} questions", questionnaire.questions.len());
    Ok(questionnaire)
}

/// Load a completed response with context for error messages.
pub fn load_response(path: &Path) -> Result<AssessmentResponse> {
    tracing::info!("Loading response: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file: {}", path.display()))?;
    let response = AssessmentResponse::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse response: {}", path.display()))?;
    tracing::debug!("Loaded {} answers", response.responses.len());
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rubric_missing_file() {
        let err = load_rubric(Path::new("/nonexistent/rubric.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read rubric file"));
    }

    #[test]
    fn test_load_rubric_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r"
tiers:
  - id: tier_0
    name: 'Tier 0: Foundation'
    criteria:
      - id: alert_triage
        name: Alert Triage
        levels:
          1: {{ qualitative: a }}
          2: {{ qualitative: b }}
          3: {{ qualitative: c }}
          4: {{ qualitative: d }}
          5: {{ qualitative: e }}
"
        )
        .unwrap();
        let rubric = load_rubric(file.path()).unwrap();
        assert_eq!(rubric.criterion_count(), 1);
    }

    #[test]
    fn test_load_invalid_rubric_mentions_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tiers: [[]]").unwrap();
        let err = load_rubric(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse rubric"));
    }
}
