//! LLM integration.
//!
//! The pipeline depends only on the [`CompletionGateway`] trait; the
//! production implementation is a Groq chat-completions client.

mod groq;
pub mod provider;

pub use groq::GroqClient;
pub use provider::{ChatMessage, CompletionGateway, CompletionRequest, CompletionResponse, Role};

use std::sync::Arc;

use crate::config::LlmSettings;
use crate::error::LlmError;

/// Create the production completion gateway from settings.
pub fn create_gateway(settings: &LlmSettings) -> Result<Arc<dyn CompletionGateway>, LlmError> {
    let client = GroqClient::new(settings.clone())?;
    tracing::info!(model = %settings.model, "Using Groq completion gateway");
    Ok(Arc::new(client))
}
