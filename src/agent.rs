//! LLM agent module for summarization.
//!
//! Groq is reached through its OpenAI-compatible chat completion endpoint;
//! Gemini goes through rstructor.

pub use crate::summary::Summary;

use crate::config::AgentConfig;
use crate::content::ContentDocument;
use crate::prompts;
use reqwest::Client;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model calls are slower than page fetches
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("model returned no completion")]
    EmptyResponse,
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        AgentError::RequestFailed(err.to_string())
    }
}

/// Hosted LLM provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Groq,
    Gemini,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Groq => "llama3-8b-8192",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }

    /// Label for the credential field
    pub fn key_label(self) -> &'static str {
        match self {
            Provider::Groq => "Groq API Key",
            Provider::Gemini => "Gemini API Key",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => write!(f, "groq"),
            Provider::Gemini => write!(f, "gemini"),
        }
    }
}

/// A text completion service. The credential is passed per call since it is
/// entered by the user at run time.
pub trait LanguageModel {
    /// Model identifier sent with each request
    fn model(&self) -> &str;

    fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AgentError>>;
}

/// Summarize a document with the fixed bullet-point prompt
pub async fn summarize<M: LanguageModel>(
    llm: &M,
    api_key: &str,
    document: &ContentDocument,
) -> Result<Summary, AgentError> {
    let prompt = prompts::render(&document.text);
    tracing::info!(
        model = llm.model(),
        chars = document.text.len(),
        "requesting summary"
    );

    let text = llm.complete(api_key, &prompt).await?;

    Ok(Summary::new(
        text,
        document.source_url.clone(),
        llm.model().to_string(),
    ))
}

/// Client for OpenAI-compatible `/chat/completions` endpoints (Groq by default)
pub struct GroqClient {
    client: Client,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// The first choice's text
    pub fn into_text(self) -> Result<String, AgentError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AgentError::EmptyResponse)
    }
}

impl GroqClient {
    pub fn new(model: impl Into<String>) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(COMPLETION_TIMEOUT).build()?;
        Ok(Self {
            client,
            model: model.into(),
            base_url: GROQ_BASE_URL.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl LanguageModel for GroqClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, AgentError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "completion request failed"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp
                .text()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, status, "failed to read error body"))
                .unwrap_or_default();
            return Err(AgentError::Api { status, message });
        }

        let raw = resp.text().await?;
        let response: CompletionResponse = serde_json::from_str(&raw)
            .map_err(|e| AgentError::ParseError(format!("{}: {}", e, raw)))?;
        response.into_text()
    }
}

/// Gemini through rstructor
pub struct GeminiAgent {
    model: String,
}

impl GeminiAgent {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl LanguageModel for GeminiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, AgentError> {
        let client = GeminiClient::new(api_key)
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(&self.model));

        let result = client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        Ok(result.text)
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        _ => GeminiModel::Gemini20Flash,
    }
}

/// The configured provider's client
pub enum LlmClient {
    Groq(GroqClient),
    Gemini(GeminiAgent),
}

impl LlmClient {
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        match config.provider {
            Provider::Groq => {
                let mut client = GroqClient::new(&config.model)?;
                if let Some(base_url) = &config.base_url {
                    client = client.with_base_url(base_url);
                }
                Ok(LlmClient::Groq(client))
            }
            Provider::Gemini => Ok(LlmClient::Gemini(GeminiAgent::new(&config.model))),
        }
    }
}

impl LanguageModel for LlmClient {
    fn model(&self) -> &str {
        match self {
            LlmClient::Groq(c) => c.model(),
            LlmClient::Gemini(c) => c.model(),
        }
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, AgentError> {
        match self {
            LlmClient::Groq(c) => c.complete(api_key, prompt).await,
            LlmClient::Gemini(c) => c.complete(api_key, prompt).await,
        }
    }
}
