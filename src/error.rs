//! Error types for Mail Triage.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("NLP error: {0}")]
    Nlp(#[from] NlpError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Text preprocessing errors.
///
/// Everything the normalizer can fail on collapses into this one
/// client-facing kind ("unprocessable"). A language the service simply
/// doesn't carry a model for is NOT an error — that path degrades to a
/// whitespace-normalized copy instead.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("Text preprocessing failed: {0}")]
    Processing(String),

    #[error("Language model '{model}' for '{language}' is not available in this runtime")]
    ModelUnavailable { language: String, model: String },
}

/// Completion provider errors ("upstream unavailable").
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned status {status}: {body}")]
    BadStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Provider {provider} returned an empty completion")]
    EmptyCompletion { provider: String },
}

/// Pipeline errors — the only two ways classification fails to produce
/// a result. Malformed or low-quality model output never lands here; it
/// is recovered to a fallback template inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Text preprocessing failed: {0}")]
    Nlp(#[from] NlpError),

    #[error("Completion service failed: {0}")]
    Llm(#[from] LlmError),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
