//! Score command handler.
//!
//! Implements the `score` subcommand: automated scoring of a completed
//! assessment response.

use crate::config::{ScoreConfig, Validatable};
use crate::pipeline::{
    auto_detect_format, exit_codes, should_use_color, write_output, LoadedAssessment,
    OutputTarget,
};
use crate::reports::create_reporter;
use crate::scoring::{AssessmentResults, ScoringRun};
use anyhow::{bail, Context, Result};

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(config: ScoreConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    let loaded = LoadedAssessment::load(
        &config.rubric_path,
        &config.questionnaire_path,
        &config.response_path,
    )?;

    let run = ScoringRun::new(&loaded.rubric, &loaded.questionnaire);
    let results = run.score(&loaded.response);

    emit_results(&results, &config, None)?;
    Ok(threshold_exit_code(&results, config.min_score))
}

/// Write the report (and optional JSON export) for a scored assessment.
pub(crate) fn emit_results(
    results: &AssessmentResults,
    config: &ScoreConfig,
    analysis: Option<&crate::scoring::ExternalAnalysis>,
) -> Result<()> {
    if let Some(json_path) = &config.json_out {
        let json = serde_json::to_string_pretty(results).context("serializing results")?;
        write_output(&json, &OutputTarget::File(json_path.clone()), config.quiet)?;
    }

    let target = OutputTarget::from_option(config.output_file.clone());
    let format = auto_detect_format(config.output, &target);
    let reporter = create_reporter(format, should_use_color(config.no_color));
    let report = reporter
        .generate(results, analysis)
        .context("generating report")?;
    write_output(&report, &target, config.quiet)?;
    Ok(())
}

/// Exit code from the --min-score threshold check.
pub(crate) fn threshold_exit_code(results: &AssessmentResults, min_score: Option<f64>) -> i32 {
    if let Some(threshold) = min_score {
        match results.overall_score {
            Some(score) if score >= threshold => {}
            Some(score) => {
                tracing::error!(
                    "Overall score {:.2} is below minimum threshold {:.2}",
                    score,
                    threshold
                );
                return exit_codes::BELOW_THRESHOLD;
            }
            None => {
                tracing::error!("No overall score available; failing threshold check");
                return exit_codes::BELOW_THRESHOLD;
            }
        }
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentResponse, Questionnaire, Rubric};
    use std::path::PathBuf;

    fn results_with_score(answer: i64) -> AssessmentResults {
        let rubric = Rubric::from_yaml_str(
            r"
tiers:
  - id: tier_0
    name: 'Tier 0: Foundation'
    criteria:
      - id: alert_triage
        name: Alert Triage
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
",
        )
        .unwrap();
        let questionnaire = Questionnaire::from_yaml_str(
            r"
questions:
  - id: T0-Q1
    type: scale
    tier: tier_0
    criterion: alert_triage
    question: Rate it.
",
        )
        .unwrap();
        let response = AssessmentResponse::from_yaml_str(&format!(
            "responses:\n  T0-Q1: {{ answer: {answer} }}\n"
        ))
        .unwrap();
        ScoringRun::new(&rubric, &questionnaire).score(&response)
    }

    #[test]
    fn test_threshold_pass() {
        let results = results_with_score(4);
        assert_eq!(threshold_exit_code(&results, Some(3.0)), exit_codes::SUCCESS);
        assert_eq!(threshold_exit_code(&results, None), exit_codes::SUCCESS);
    }

    #[test]
    fn test_threshold_fail() {
        let results = results_with_score(2);
        assert_eq!(
            threshold_exit_code(&results, Some(3.0)),
            exit_codes::BELOW_THRESHOLD
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScoreConfig::new(PathBuf::from("response.yaml"));
        config.min_score = Some(42.0);
        let err = run_score(config).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_response_file_is_error() {
        let config = ScoreConfig::new(PathBuf::from("/nonexistent/response.yaml"));
        assert!(run_score(config).is_err());
    }
}
