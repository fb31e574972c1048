use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use reqwest::Client;

use crate::config::Config;
use crate::error::{Result, AppError};
use crate::extract::ExtractedDocument;

pub const PROMPT_TEMPLATE: &str = "Provide a summary of the following content in 300 words:\nContent: {text}\n";

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub text: String,
}

/// Turns one extracted document into a summary with a single model call.
/// The whole text goes into one prompt; nothing is chunked or truncated.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, document: &ExtractedDocument) -> Result<Summary>;
}

pub fn build_prompt(content: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", content)
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Summarization("Invalid response format from LLM".to_string()))
    }
}

/// Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: crate::config::DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.groq_api_key.as_ref()?;
        Some(Self::new(api_key, &config.groq_model).with_base_url(&config.groq_base_url))
    }

    pub async fn send_completion_request(&self, prompt: &str) -> Result<CompletionResponse> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "user".into(),
                    content: prompt.into(),
                }
            ],
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach completion endpoint");
                AppError::Summarization(e.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(AppError::Summarization(format!("API error: {} - {}", status, message)));
        }

        res.json::<CompletionResponse>()
            .await
            .map_err(|e| AppError::Summarization(format!("Malformed completion response: {}", e)))
    }
}

#[async_trait]
impl Summarizer for GroqClient {
    async fn summarize(&self, document: &ExtractedDocument) -> Result<Summary> {
        let prompt = build_prompt(&document.text);
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Calling completion API");

        let llm_start = std::time::Instant::now();
        let text = self.send_completion_request(&prompt).await?.into_text()?;
        tracing::debug!(elapsed = ?llm_start.elapsed(), summary_chars = text.len(), "Completion received");

        Ok(Summary { text })
    }
}
