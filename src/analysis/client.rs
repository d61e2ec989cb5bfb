//! HTTP client for LLM analysis providers.

use crate::error::{AnalysisErrorKind, AssessmentError, Result};
use crate::scoring::ExternalAnalysis;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompt::parse_analysis_response;

/// Supported analysis providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    Anthropic,
    Openai,
}

impl Provider {
    /// Default model when none is given on the command line.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5",
            Self::Openai => "gpt-4o",
        }
    }

    const fn api_key_env(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Openai => "OPENAI_API_KEY",
        }
    }

    const fn api_base(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::Openai => "https://api.openai.com",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
            Self::Openai => write!(f, "openai"),
        }
    }
}

/// LLM client configuration.
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub provider: Provider,
    pub model: String,
    /// Base URL; overridable for testing against a local endpoint
    pub api_base: String,
    pub timeout: Duration,
    pub max_retries: u8,
}

impl LlmClientConfig {
    #[must_use]
    pub fn new(provider: Provider, model: Option<String>) -> Self {
        Self {
            provider,
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            api_base: provider.api_base().to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
        }
    }
}

/// HTTP client for the configured provider.
pub struct LlmClient {
    client: Client,
    config: LlmClientConfig,
    api_key: String,
}

fn network_error(msg: &str, err: &reqwest::Error) -> AssessmentError {
    AssessmentError::analysis(msg, AnalysisErrorKind::NetworkError(err.to_string()))
}

fn api_error(msg: impl Into<String>) -> AssessmentError {
    AssessmentError::analysis("API request", AnalysisErrorKind::ApiError(msg.into()))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    temperature: f64,
    response_format: serde_json::Value,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: String,
}

impl LlmClient {
    /// Create a client; the API key comes from the provider's environment
    /// variable.
    pub fn new(config: LlmClientConfig) -> Result<Self> {
        let env_var = config.provider.api_key_env();
        let api_key = std::env::var(env_var).map_err(|_| {
            AssessmentError::analysis(
                "reading credentials",
                AnalysisErrorKind::MissingApiKey(env_var.to_string()),
            )
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Send the analysis prompt and parse the reply, with retries.
    pub fn analyze(&self, prompt: &str) -> Result<ExternalAnalysis> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 1));
                std::thread::sleep(delay);
                tracing::debug!("Retry attempt {} after {:?}", attempt, delay);
            }

            match self.send_request(prompt) {
                Ok(text) => return parse_analysis_response(&text),
                Err(e) => {
                    tracing::debug!("Analysis request attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| api_error("Unknown error")))
    }

    fn send_request(&self, prompt: &str) -> Result<String> {
        match self.config.provider {
            Provider::Anthropic => self.send_anthropic(prompt),
            Provider::Openai => self.send_openai(prompt),
        }
    }

    fn send_anthropic(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.config.api_base);
        let body = AnthropicRequest {
            model: &self.config.model,
            max_tokens: 4096,
            temperature: 0.2,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .map_err(|e| network_error("Failed to send analysis request", &e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AssessmentError::analysis(
                "API request",
                AnalysisErrorKind::RateLimited(response.text().unwrap_or_default()),
            ));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(format!(
                "Anthropic API returned error status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: AnthropicResponse = response.json().map_err(|e| {
            AssessmentError::analysis(
                "parsing response",
                AnalysisErrorKind::InvalidResponse(e.to_string()),
            )
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| {
                AssessmentError::analysis(
                    "parsing response",
                    AnalysisErrorKind::InvalidResponse("empty content".to_string()),
                )
            })
    }

    fn send_openai(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.config.api_base);
        let body = OpenAiRequest {
            model: &self.config.model,
            temperature: 0.2,
            response_format: serde_json::json!({"type": "json_object"}),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| network_error("Failed to send analysis request", &e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AssessmentError::analysis(
                "API request",
                AnalysisErrorKind::RateLimited(response.text().unwrap_or_default()),
            ));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(format!(
                "OpenAI API returned error status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: OpenAiResponse = response.json().map_err(|e| {
            AssessmentError::analysis(
                "parsing response",
                AnalysisErrorKind::InvalidResponse(e.to_string()),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                AssessmentError::analysis(
                    "parsing response",
                    AnalysisErrorKind::InvalidResponse("empty choices".to_string()),
                )
            })
    }
}
