//! Analyze command handler.
//!
//! Implements the `analyze` subcommand: automated scoring followed by
//! LLM-assisted scoring of text answers, merged into a single result tree.

use crate::analysis::{build_analysis_prompt, build_rubric_context, LlmClient, LlmClientConfig};
use crate::config::{AnalysisConfig, Validatable};
use crate::pipeline::{write_output, LoadedAssessment, OutputTarget};
use crate::scoring::{merge_external_scores, ScoringRun};
use anyhow::{bail, Context, Result};

use super::score::{emit_results, threshold_exit_code};

/// Run the analyze command, returning the desired exit code.
pub fn run_analyze(config: AnalysisConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    let loaded = LoadedAssessment::load(
        &config.score.rubric_path,
        &config.score.questionnaire_path,
        &config.score.response_path,
    )?;

    let run = ScoringRun::new(&loaded.rubric, &loaded.questionnaire);
    let results = run.score(&loaded.response);

    if results.needs_review.is_empty() {
        tracing::info!("No text answers to review; emitting automated results only");
        emit_results(&results, &config.score, None)?;
        return Ok(threshold_exit_code(&results, config.score.min_score));
    }

    let rubric_context = build_rubric_context(&loaded.rubric);
    let prompt = build_analysis_prompt(&results, &rubric_context, &loaded.questionnaire);

    if config.dry_run {
        let divider = "=".repeat(60);
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| config.provider.default_model().to_string());
        println!("{divider}");
        println!("DRY RUN - Prompt that would be sent:");
        println!("{divider}");
        println!("{prompt}");
        println!("{divider}");
        println!("Provider: {}", config.provider);
        println!("Model: {model}");
        println!("Text answers to score: {}", results.needs_review.len());
        return Ok(crate::pipeline::exit_codes::SUCCESS);
    }

    tracing::info!("Requesting analysis from {}", config.provider);
    let client = LlmClient::new(LlmClientConfig::new(config.provider, config.model.clone()))?;
    let analysis = client.analyze(&prompt)?;
    tracing::info!(
        text_scores = analysis.text_scores.len(),
        inconsistencies = analysis.inconsistencies.len(),
        "Analysis complete"
    );

    if let Some(path) = &config.analysis_json_out {
        let json = serde_json::to_string_pretty(&analysis).context("serializing analysis")?;
        write_output(&json, &OutputTarget::File(path.clone()), config.score.quiet)?;
    }

    let merged = merge_external_scores(
        &results,
        &analysis,
        &loaded.questionnaire,
        run.criterion_index(),
    );

    emit_results(&merged, &config.score, Some(&analysis))?;
    Ok(threshold_exit_code(&merged, config.score.min_score))
}
