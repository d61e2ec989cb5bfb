//! debmm-tools: DEBMM assessment scoring and reporting tool
//!
//! Scores completed Detection Engineering Behavior Maturity Model
//! questionnaires against a tiered rubric.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use debmm_tools::{
    cli,
    config::{ScoreConfig, DEFAULT_QUESTIONNAIRE, DEFAULT_RUBRIC},
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Formats:",
        "\n  YAML rubric, questionnaire, and assessment response",
        "\n\nOutput Formats:",
        "\n  summary, json, markdown",
        "\n\nFeatures:",
        "\n  Weighted scoring, tier determination, recommendations, LLM-assisted text scoring"
    )
}

#[derive(Parser)]
#[command(name = "debmm-tools")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "DEBMM assessment scoring and reporting tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Assessment scored (and above --min-score, if given)
    1  Overall score below --min-score / validation findings
    2  Error occurred

EXAMPLES:
    # Score a completed assessment with auto-detected output
    debmm-tools score response.yaml

    # CI/CD maturity gate
    debmm-tools score response.yaml -o summary --min-score 3.0

    # Export full results as JSON
    debmm-tools score response.yaml -o json > results.json

    # Render a Markdown report to a file
    debmm-tools score response.yaml -o markdown -O report.md

    # Score text answers with an LLM and merge them in
    debmm-tools analyze response.yaml --provider anthropic

    # Check rubric/questionnaire cross-references
    debmm-tools validate --rubric rubric/rubric.yaml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Path to the completed assessment response
    response: PathBuf,

    /// Path to the rubric document
    #[arg(long, default_value = DEFAULT_RUBRIC)]
    rubric: PathBuf,

    /// Path to the questionnaire document
    #[arg(long, default_value = DEFAULT_QUESTIONNAIRE)]
    questionnaire: PathBuf,

    /// Output format (auto detects TTY: summary if interactive, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Also save the full JSON results to this path
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Exit with code 1 when the overall score is below this value (1.0-5.0)
    #[arg(long)]
    min_score: Option<f64>,
}

/// Arguments for the `analyze` subcommand
#[cfg(feature = "analysis")]
#[derive(Parser)]
struct AnalyzeArgs {
    #[command(flatten)]
    score: ScoreArgs,

    /// LLM provider for text-answer scoring
    #[arg(long, value_enum, default_value_t = debmm_tools::Provider::Anthropic)]
    provider: debmm_tools::Provider,

    /// Model name (provider default if not specified)
    #[arg(long)]
    model: Option<String>,

    /// Save the raw analysis JSON to this path
    #[arg(long)]
    analysis_json_out: Option<PathBuf>,

    /// Print the prompt without calling the API
    #[arg(long)]
    dry_run: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the rubric document
    #[arg(long, default_value = DEFAULT_RUBRIC)]
    rubric: PathBuf,

    /// Path to the questionnaire document
    #[arg(long, default_value = DEFAULT_QUESTIONNAIRE)]
    questionnaire: PathBuf,

    /// Emit findings as JSON
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a completed assessment response
    Score(ScoreArgs),

    /// Score an assessment and run LLM analysis on text answers
    #[cfg(feature = "analysis")]
    Analyze(AnalyzeArgs),

    /// Check rubric/questionnaire cross-references
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn score_config(args: ScoreArgs, cli_no_color: bool, cli_quiet: bool) -> ScoreConfig {
    ScoreConfig {
        response_path: args.response,
        rubric_path: args.rubric,
        questionnaire_path: args.questionnaire,
        output: args.output,
        output_file: args.output_file,
        json_out: args.json_out,
        min_score: args.min_score,
        no_color: cli_no_color,
        quiet: cli_quiet,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Score(args) => {
            let config = score_config(args, cli.no_color, cli.quiet);
            let exit_code = cli::run_score(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        #[cfg(feature = "analysis")]
        Commands::Analyze(args) => {
            let config = debmm_tools::config::AnalysisConfig {
                score: score_config(args.score, cli.no_color, cli.quiet),
                provider: args.provider,
                model: args.model,
                analysis_json_out: args.analysis_json_out,
                dry_run: args.dry_run,
            };
            let exit_code = cli::run_analyze(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Validate(args) => {
            let exit_code =
                cli::run_validate(args.rubric, args.questionnaire, args.json, args.output_file)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "debmm-tools", &mut io::stdout());
            Ok(())
        }
    }
}
