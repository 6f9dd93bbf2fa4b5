//! Shared types for the classification pipeline.

use serde::{Deserialize, Serialize};

use crate::templates::Category;

// ── Email ───────────────────────────────────────────────────────────

/// An inbound support email. Immutable value supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
}

impl Email {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Canonical single-text form fed to the pipeline.
    pub fn as_message_text(&self) -> String {
        format!("Subject: {}\n\nBody: {}", self.subject, self.body)
    }
}

// ── Classification result ───────────────────────────────────────────

/// Final annotated result for one email.
///
/// Invariant: `suggested_subject` is at least 5 chars and
/// `suggested_body` at least 50, on both the accepted and the fallback
/// path — raw model output never reaches a caller unchecked.
///
/// Serialized in camelCase for the web frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub is_productive: bool,
    pub category: Option<Category>,
    pub suggested_subject: String,
    pub suggested_body: String,
    pub detected_language: String,
    pub original_email: Email,
}

// ── Outcome ─────────────────────────────────────────────────────────

/// Why a fallback template was used instead of model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The model's output was not a parseable JSON object.
    UnparsableOutput,
    /// The output parsed but failed the quality gate (missing fields,
    /// too-short subject/body, unknown category).
    InvalidOutput,
}

impl FallbackReason {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnparsableOutput => "unparsable_output",
            Self::InvalidOutput => "invalid_output",
        }
    }
}

/// Discriminated pipeline outcome, so callers can tell "model output
/// accepted" from "recovered with a template" without re-inspecting
/// the result.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Validated model output.
    Accepted(ClassificationResult),
    /// Deterministic template substitute.
    Fallback(ClassificationResult, FallbackReason),
}

impl Outcome {
    pub fn result(&self) -> &ClassificationResult {
        match self {
            Self::Accepted(result) | Self::Fallback(result, _) => result,
        }
    }

    pub fn into_result(self) -> ClassificationResult {
        match self {
            Self::Accepted(result) | Self::Fallback(result, _) => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(..))
    }
}
