//! JSON report output.

use crate::error::{AssessmentError, ReportErrorKind, Result};
use crate::scoring::{AssessmentResults, ExternalAnalysis};
use serde_json::json;

use super::{ReportFormat, ReportGenerator};

/// Emits the full result tree wrapped in a tool/version envelope.
#[derive(Debug, Clone, Default)]
pub struct JsonReporter;

impl JsonReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        results: &AssessmentResults,
        analysis: Option<&ExternalAnalysis>,
    ) -> Result<String> {
        let mut output = json!({
            "tool": "debmm-tools",
            "version": env!("CARGO_PKG_VERSION"),
            "results": results,
        });
        if let (Some(analysis), Some(map)) = (analysis, output.as_object_mut()) {
            map.insert("analysis".to_string(), serde_json::to_value(analysis)?);
        }

        serde_json::to_string_pretty(&output).map_err(|e| {
            AssessmentError::report(
                "serializing results",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
