//! Per-language reduction models and their cache.
//!
//! A "model" here is a Snowball stemmer paired with the language's
//! stop-word list. Construction walks the published word lists, so
//! models are built lazily and cached — at most one entry per
//! supported language ever exists.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::NlpError;

/// Declaration of a supported language model.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// ISO 639-1 language code.
    pub language: &'static str,
    /// Model name, used in diagnostics when loading fails.
    pub name: &'static str,
    /// Snowball stemming algorithm for this language.
    pub algorithm: Algorithm,
    /// Stop-word list identifier.
    pub stop_words: stop_words::LANGUAGE,
}

/// Fixed mapping from language code to model declaration.
///
/// A language missing here is simply unsupported — not an error; the
/// normalizer degrades to whitespace normalization for it.
pub fn supported_model(language: &str) -> Option<ModelSpec> {
    match language {
        "pt" => Some(ModelSpec {
            language: "pt",
            name: "snowball-portuguese",
            algorithm: Algorithm::Portuguese,
            stop_words: stop_words::LANGUAGE::Portuguese,
        }),
        "en" => Some(ModelSpec {
            language: "en",
            name: "snowball-english",
            algorithm: Algorithm::English,
            stop_words: stop_words::LANGUAGE::English,
        }),
        _ => None,
    }
}

/// Languages with a registered model, for startup pre-warming.
const SUPPORTED_LANGUAGES: [&str; 2] = ["pt", "en"];

// ── Language model ──────────────────────────────────────────────────

/// A loaded reduction model: stemmer plus stop-word set.
///
/// Shared-read after construction; never mutated.
pub struct LanguageModel {
    language: &'static str,
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

impl LanguageModel {
    /// Load the model declared by `spec`.
    ///
    /// A declared-supported language whose stop-word list the runtime
    /// cannot produce is a processing error — distinct from the
    /// language being unsupported in the first place.
    fn load(spec: &ModelSpec) -> Result<Self, NlpError> {
        let words = stop_words::get(spec.stop_words.clone());
        if words.is_empty() {
            return Err(NlpError::ModelUnavailable {
                language: spec.language.to_string(),
                model: spec.name.to_string(),
            });
        }
        Ok(Self {
            language: spec.language,
            stemmer: Stemmer::create(spec.algorithm),
            stop_words: words.into_iter().collect(),
        })
    }

    /// Language code this model serves.
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Reduce text to lower-cased stems, dropping stop words and
    /// punctuation, joined by single spaces.
    pub fn reduce(&self, text: &str) -> String {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| !self.stop_words.contains(word))
            .map(|word| self.stemmer.stem(&word).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Model cache ─────────────────────────────────────────────────────

/// Process-wide model cache.
///
/// Construction happens under the lock, so concurrent first-use of the
/// same language builds the model exactly once. The cache is bounded
/// structurally: only declared-supported languages are ever inserted.
pub struct ModelCache {
    models: Mutex<std::collections::HashMap<&'static str, Arc<LanguageModel>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            models: Mutex::new(std::collections::HashMap::new()),
        }
    }

    /// Eagerly load every supported language model.
    ///
    /// Called at startup so the request path never races on first-use
    /// construction and a broken runtime is caught before serving.
    pub fn prewarm(&self) -> Result<(), NlpError> {
        for language in SUPPORTED_LANGUAGES {
            self.get_or_load(language)?;
        }
        Ok(())
    }

    /// Fetch the model for `language`, loading it on first use.
    ///
    /// `Ok(None)` means the language is unsupported; `Err` means a
    /// supported language's model could not be loaded.
    pub fn get_or_load(&self, language: &str) -> Result<Option<Arc<LanguageModel>>, NlpError> {
        let Some(spec) = supported_model(language) else {
            return Ok(None);
        };

        let mut models = self.models.lock();
        if let Some(model) = models.get(spec.language) {
            return Ok(Some(Arc::clone(model)));
        }

        let model = Arc::new(LanguageModel::load(&spec)?);
        models.insert(spec.language, Arc::clone(&model));
        tracing::debug!(language = spec.language, model = spec.name, "Loaded language model");
        Ok(Some(model))
    }

    /// Number of models currently cached.
    pub fn loaded(&self) -> usize {
        self.models.lock().len()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_model_known_languages() {
        assert!(supported_model("pt").is_some());
        assert!(supported_model("en").is_some());
        assert!(supported_model("fr").is_none());
        assert!(supported_model("ru").is_none());
        assert!(supported_model("").is_none());
    }

    #[test]
    fn cache_loads_lazily_and_reuses() {
        let cache = ModelCache::new();
        assert_eq!(cache.loaded(), 0);

        let first = cache.get_or_load("en").unwrap().unwrap();
        assert_eq!(cache.loaded(), 1);

        let second = cache.get_or_load("en").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loaded(), 1);
    }

    #[test]
    fn cache_unsupported_language_is_not_an_error() {
        let cache = ModelCache::new();
        assert!(cache.get_or_load("de").unwrap().is_none());
        assert_eq!(cache.loaded(), 0);
    }

    #[test]
    fn prewarm_loads_all_supported() {
        let cache = ModelCache::new();
        cache.prewarm().unwrap();
        assert_eq!(cache.loaded(), 2);

        // Idempotent
        cache.prewarm().unwrap();
        assert_eq!(cache.loaded(), 2);
    }

    #[test]
    fn reduce_drops_stop_words_and_stems() {
        let cache = ModelCache::new();
        let model = cache.get_or_load("en").unwrap().unwrap();

        let reduced = model.reduce("The application keeps crashing when I open it");
        let tokens: Vec<&str> = reduced.split_whitespace().collect();

        assert!(!tokens.contains(&"the"));
        assert!(!tokens.contains(&"The"));
        assert!(!tokens.contains(&"when"));
        assert!(tokens.contains(&"crash"), "got: {reduced}");
    }

    #[test]
    fn reduce_drops_punctuation_and_lowercases() {
        let cache = ModelCache::new();
        let model = cache.get_or_load("en").unwrap().unwrap();

        let reduced = model.reduce("URGENT!!! Broken, broken... broken?");
        assert!(!reduced.contains('!'));
        assert!(!reduced.contains(','));
        assert!(!reduced.contains('?'));
        assert_eq!(reduced, reduced.to_lowercase());
    }

    #[test]
    fn reduce_portuguese_text() {
        let cache = ModelCache::new();
        let model = cache.get_or_load("pt").unwrap().unwrap();

        let reduced = model.reduce("Não consigo pagar o boleto da minha fatura");
        let tokens: Vec<&str> = reduced.split_whitespace().collect();

        assert!(!tokens.contains(&"o"));
        assert!(!tokens.contains(&"minha"));
        assert!(
            tokens.iter().any(|t| t.starts_with("pag")),
            "got: {reduced}"
        );
    }

    #[test]
    fn reduce_empty_input() {
        let cache = ModelCache::new();
        let model = cache.get_or_load("en").unwrap().unwrap();
        assert_eq!(model.reduce(""), "");
    }
}
