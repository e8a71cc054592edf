//! LLM Client — the single point of entry for generation-service calls.
//!
//! ARCHITECTURAL RULE: the chain only ever sees the `ModelInvoker` trait.
//! `OpenAiClient` is the production backend; tests plug in scripted fakes.
//!
//! No retries happen here. A failed call surfaces as `ModelInvocationError`
//! and the caller decides what to do with it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::SamplingConfig;

pub mod prompts;

pub const DEFAULT_MODEL: &str = "gpt-5-chat-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ModelInvocationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A model-ready prompt: system instruction plus user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// One request/response round trip against a text-generation service.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<String, ModelInvocationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI Responses API backend
// ────────────────────────────────────────────────────────────────────────────

/// Everything the client needs, resolved up front by the caller.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    input: [InputMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` part of every message item.
    /// Returns an empty string when the response carries no text.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for `POST {base_url}/responses`.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ModelInvocationError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(
        &'a self,
        prompt: &'a Prompt,
        sampling: &SamplingConfig,
    ) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_output_tokens: sampling.max_tokens,
            input: [
                InputMessage {
                    role: "system",
                    content: &prompt.system,
                },
                InputMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        }
    }
}

#[async_trait]
impl ModelInvoker for OpenAiClient {
    async fn invoke(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<String, ModelInvocationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt, sampling))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelInvocationError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let parsed: ResponsesResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(parsed.output_text())
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
