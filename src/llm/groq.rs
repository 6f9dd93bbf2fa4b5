//! Groq chat-completions client (OpenAI-compatible wire format).

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::LlmSettings;
use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionGateway, CompletionRequest, CompletionResponse};

const PROVIDER: &str = "groq";
const COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Long-lived Groq client. Stateless between calls; the underlying
/// `reqwest::Client` pools connections and enforces the request
/// timeout.
pub struct GroqClient {
    http: reqwest::Client,
    settings: LlmSettings,
    url: String,
}

impl GroqClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            settings,
            url: COMPLETIONS_URL.to_string(),
        })
    }

    /// Override the completions endpoint (tests only).
    #[cfg(test)]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl CompletionGateway for GroqClient {
    fn model_name(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = WireRequest::build(&self.settings.model, &request);

        // Exactly one attempt. Retrying on behalf of the caller would
        // hide rate limits and double-bill failed batches.
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::BadStatus {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body: truncate(&body, 300),
            });
        }

        let completion: WireResponse =
            response.json().await.map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("malformed completion envelope: {e}"),
            })?;

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(LlmError::EmptyCompletion {
                provider: PROVIDER.to_string(),
            });
        };

        let usage = completion.usage.unwrap_or_default();
        Ok(CompletionResponse {
            content: choice.message.content,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ── Wire format ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> WireRequest<'a> {
    fn build(model: &'a str, request: &'a CompletionRequest) -> Self {
        Self {
            model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_response
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
