//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default completion model served by Groq.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default bind address for the HTTP server.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Default timeout applied to each completion request.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion provider settings.
    pub llm: LlmSettings,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

/// Settings for the completion provider client.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Provider API key. Absence is a startup failure, never a
    /// per-request error.
    pub api_key: SecretString,
    /// Fixed model identifier used for every completion.
    pub model: String,
    /// Hard bound on each completion request.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Exists so tests can exercise parsing without mutating the
    /// process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()))?;

        let model = lookup("MAIL_TRIAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let bind_addr = lookup("MAIL_TRIAGE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let timeout_secs = match lookup("MAIL_TRIAGE_LLM_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: "MAIL_TRIAGE_LLM_TIMEOUT_SECS".to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Self {
            llm: LlmSettings {
                api_key: SecretString::from(api_key),
                model,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            bind_addr,
        })
    }
}
