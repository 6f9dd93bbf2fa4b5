//! Email classification pipeline.
//!
//! Every email flows through:
//! 1. `TextNormalizer` — strip noise, detect language, reduce text
//! 2. `prompt::build()` — instruction + few-shot examples for the
//!    detected language
//! 3. `CompletionGateway::complete()` — one shot, no retry
//! 4. JSON parse → `validator::validate()` — quality gate
//! 5. Accept, or fall back to a catalog template
//!
//! Unusable model output is never an error: it degrades to a fallback
//! template. Only preprocessing and gateway failures escape.

pub mod classifier;
pub mod fallback;
pub mod prompt;
pub mod types;
pub mod validator;

pub use classifier::Classifier;
pub use types::{ClassificationResult, Email, FallbackReason, Outcome};
