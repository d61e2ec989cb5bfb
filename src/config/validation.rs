//! Configuration validation.

use super::types::ScoreConfig;

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for ScoreConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(min_score) = self.min_score {
            if !(1.0..=5.0).contains(&min_score) {
                errors.push(ConfigError {
                    field: "min_score".to_string(),
                    message: format!("Must be between 1.0 and 5.0, got {min_score}"),
                });
            }
        }

        errors
    }
}

#[cfg(feature = "analysis")]
impl Validatable for super::types::AnalysisConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.score.validate();

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                errors.push(ConfigError {
                    field: "model".to_string(),
                    message: "Model name must not be empty".to_string(),
                });
            }
        }

        errors
    }
}
