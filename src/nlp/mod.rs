//! NLP preprocessing — noise stripping, language detection, token
//! reduction.
//!
//! Flow:
//! 1. `TextNormalizer` strips HTML tags, URLs and email addresses
//! 2. Language is detected deterministically (same input, same output)
//! 3. If a model is registered for the language, text is reduced to
//!    lower-cased stems with stop words removed; otherwise a
//!    whitespace-normalized lower-cased copy is used

pub mod models;
pub mod normalizer;

pub use models::{LanguageModel, ModelCache, ModelSpec, supported_model};
pub use normalizer::{FALLBACK_LANGUAGE, TextNormalizer, detect_language};
