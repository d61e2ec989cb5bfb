//! Unified error types for debmm-tools.
//!
//! Question-level problems (unanswered, invalid, unknown type) are NOT
//! errors: they are recorded as issues in the scoring results. This module
//! covers structural failures only: unreadable files, malformed rubric or
//! questionnaire definitions, report generation, and analysis API failures.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for debmm-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssessmentError {
    /// Errors loading or validating the rubric/questionnaire/response
    #[error("Failed to load assessment data: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// Errors during LLM-assisted analysis
    #[error("Analysis failed: {context}")]
    Analysis {
        context: String,
        #[source]
        source: AnalysisErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load/validation error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Criterion '{criterion}' is missing maturity level {level} (levels 1-5 are required)")]
    MissingLevel { criterion: String, level: u8 },

    #[error("Criterion '{criterion}' has invalid weight {weight} (must be finite and > 0)")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },

    #[error("Question '{question}' references unknown {kind}: {id}")]
    UnknownReference {
        question: String,
        kind: String,
        id: String,
    },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

/// Specific analysis error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisErrorKind {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API key not set: {0}")]
    MissingApiKey(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for debmm-tools operations
pub type Result<T> = std::result::Result<T, AssessmentError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AssessmentError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::load(
            "missing required field",
            LoadErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an analysis error
    pub fn analysis(context: impl Into<String>, source: AnalysisErrorKind) -> Self {
        Self::Analysis {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AssessmentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for AssessmentError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load(
            "YAML deserialization",
            LoadErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

impl From<serde_json::Error> for AssessmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AssessmentError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AssessmentError, new_ctx: &str) -> AssessmentError {
    match err {
        AssessmentError::Load {
            context: existing,
            source,
        } => AssessmentError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Report {
            context: existing,
            source,
        } => AssessmentError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Analysis {
            context: existing,
            source,
        } => AssessmentError::Analysis {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Io {
            path,
            message,
            source,
        } => AssessmentError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AssessmentError::Config(msg) => AssessmentError::Config(chain_context(new_ctx, &msg)),
        AssessmentError::Validation(msg) => {
            AssessmentError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AssessmentError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessmentError::load(
            "rubric.yaml",
            LoadErrorKind::MissingLevel {
                criterion: "alert_triage".to_string(),
                level: 4,
            },
        );
        let display = err.to_string();
        assert!(display.contains("rubric.yaml"), "got: {display}");
    }

    #[test]
    fn test_missing_level_source_message() {
        let kind = LoadErrorKind::MissingLevel {
            criterion: "detection_lifecycle".to_string(),
            level: 2,
        };
        let msg = kind.to_string();
        assert!(msg.contains("detection_lifecycle"));
        assert!(msg.contains("level 2"));
    }

    #[test]
    fn test_error_chain_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AssessmentError::io("/path/to/response.yaml", io_err);
        assert!(err.to_string().contains("/path/to/response.yaml"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(AssessmentError::load(
            "initial context",
            LoadErrorKind::InvalidYaml("bad mapping".to_string()),
        ));

        let chained = initial.context("outer context");
        match chained {
            Err(AssessmentError::Load { context, .. }) => {
                assert!(context.contains("outer context"), "got: {context}");
                assert!(context.contains("initial context"), "got: {context}");
            }
            _ => panic!("Expected Load error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(AssessmentError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.context_none("missing").unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(AssessmentError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
