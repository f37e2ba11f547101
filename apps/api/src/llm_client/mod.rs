/// LLM Client — the single point of entry for all model calls in the shortlist service.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama API directly.
/// Chat completions go through `LanguageModel`, embeddings through `Embedder`,
/// so the evaluation pipeline and the chunk index can be exercised with fakes.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Low temperature keeps judgments stable across repeated runs.
const TEMPERATURE: f32 = 0.2;
/// Context window requested from Ollama; retrieved passages plus the prompt must fit.
const NUM_CTX: u32 = 32768;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty embedding")]
    EmptyEmbedding,
}

/// Produces a raw text completion for a system instruction and a user prompt.
///
/// The returned text is untrusted: callers must not assume it is well-formed.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Produces a dense vector for a piece of text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_ctx: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ResponseMessage,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// The single Ollama client used by all services.
/// Wraps `/api/chat` and `/api/embeddings`; one HTTP call per request, no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
    embed_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout_secs))
                .build()?,
            base_url: config.ollama_host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            embed_model: config.embed_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embed_model(&self) -> &str {
        &self.embed_model
    }

    /// Makes a raw, non-streaming chat call, returning the full response object.
    pub async fn chat(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: TEMPERATURE,
                num_ctx: NUM_CTX,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let chat: ChatResponse = response.json().await?;

        debug!(
            "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
            chat.prompt_eval_count, chat.eval_count
        );

        Ok(chat)
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.chat(prompt, system).await?;
        Ok(response.message.content)
    }
}

#[async_trait]
impl Embedder for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&EmbeddingRequest {
                model: &self.embed_model,
                prompt: text,
            })
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let body: EmbeddingResponse = response.json().await?;

        if body.embedding.is_empty() {
            return Err(LlmError::EmptyEmbedding);
        }
        Ok(body.embedding)
    }
}

/// Converts a non-2xx response into `LlmError::Api`, preferring Ollama's `error` field.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: api_error_message(body),
    })
}

fn api_error_message(body: String) -> String {
    serde_json::from_str::<OllamaError>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}
