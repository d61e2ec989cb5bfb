//! LLM-assisted analysis of text answers.
//!
//! Automated scoring leaves free-text answers in needs-review state. This
//! module builds an analysis prompt from the rubric and the pending answers,
//! sends it to a provider (Anthropic or OpenAI), and parses the structured
//! reply into an [`ExternalAnalysis`](crate::scoring::ExternalAnalysis)
//! ready for `scoring::merge`.

mod client;
mod prompt;

pub use client::{LlmClient, LlmClientConfig, Provider};
pub use prompt::{build_analysis_prompt, build_rubric_context, parse_analysis_response};
