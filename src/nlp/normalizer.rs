//! Text normalization: noise stripping, language detection, reduction.

use std::sync::Arc;

use regex::Regex;
use whatlang::Lang;

use crate::error::NlpError;
use crate::nlp::models::ModelCache;

/// Language assumed when detection fails or yields an unmapped code.
pub const FALLBACK_LANGUAGE: &str = "pt";

/// HTML-like tags, URL-like tokens and email-address-like tokens.
const NOISE_PATTERN: &str = r"<.*?>|http\S+|\S+@\S+";

/// Cleans raw email text and detects its language.
pub struct TextNormalizer {
    noise: Regex,
    models: Arc<ModelCache>,
}

impl TextNormalizer {
    pub fn new(models: Arc<ModelCache>) -> Self {
        Self {
            noise: Regex::new(NOISE_PATTERN).unwrap(),
            models,
        }
    }

    /// Normalize raw text into `(cleaned_text, language)`.
    ///
    /// 1. Strip tags, URLs and email addresses
    /// 2. Detect language (failure → `"pt"`)
    /// 3. Reduce through the language's model, or fall back to a
    ///    whitespace-normalized lower-cased copy when no model is
    ///    registered for the language
    pub fn normalize(&self, raw: &str) -> Result<(String, String), NlpError> {
        let stripped = self.noise.replace_all(raw, "");
        let language = detect_language(&stripped);

        let cleaned = match self.models.get_or_load(&language)? {
            Some(model) => model.reduce(&stripped),
            None => collapse_whitespace(&stripped),
        };

        Ok((cleaned, language))
    }
}

/// Detect the language of `text` as an ISO 639-1 code.
///
/// The detector is statistical but fully deterministic — identical
/// input yields an identical code across runs and processes. Any
/// failure (empty input, unrecognizable script, unmapped language)
/// yields [`FALLBACK_LANGUAGE`].
pub fn detect_language(text: &str) -> String {
    whatlang::detect(text)
        .and_then(|info| iso_639_1(info.lang()))
        .unwrap_or(FALLBACK_LANGUAGE)
        .to_string()
}

/// Map the detector's language to ISO 639-1 for the codes we expect
/// to see in support mail. Anything else is treated as undetected.
fn iso_639_1(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Por => Some("pt"),
        Lang::Eng => Some("en"),
        Lang::Spa => Some("es"),
        Lang::Fra => Some("fr"),
        Lang::Deu => Some("de"),
        Lang::Ita => Some("it"),
        Lang::Nld => Some("nl"),
        Lang::Rus => Some("ru"),
        Lang::Ukr => Some("uk"),
        Lang::Pol => Some("pl"),
        Lang::Tur => Some("tr"),
        Lang::Ara => Some("ar"),
        Lang::Jpn => Some("ja"),
        Lang::Kor => Some("ko"),
        Lang::Cmn => Some("zh"),
        Lang::Hin => Some("hi"),
        _ => None,
    }
}

/// Lower-cased copy of `text` with runs of whitespace collapsed to
/// single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(Arc::new(ModelCache::new()))
    }

    #[test]
    fn strips_html_tags() {
        let (cleaned, _) = normalizer()
            .normalize("<html><body>My invoice payment failed yesterday</body></html>")
            .unwrap();
        assert!(!cleaned.contains('<'));
        assert!(!cleaned.contains('>'));
    }

    #[test]
    fn strips_urls() {
        let (cleaned, _) = normalizer()
            .normalize("Please check https://example.com/help and http://status.example.com now")
            .unwrap();
        assert!(!cleaned.contains("http"));
    }

    #[test]
    fn strips_email_addresses() {
        let (cleaned, _) = normalizer()
            .normalize("Contact me at joao.silva@example.com.br about the broken invoice")
            .unwrap();
        assert!(!cleaned.contains('@'));
        assert!(!cleaned.contains("joao.silva"));
    }

    #[test]
    fn empty_input_defaults_to_portuguese() {
        let (cleaned, language) = normalizer().normalize("").unwrap();
        assert_eq!(cleaned, "");
        assert_eq!(language, FALLBACK_LANGUAGE);
    }

    #[test]
    fn whitespace_only_input_defaults_to_portuguese() {
        let (_, language) = normalizer().normalize("  \n\t  ").unwrap();
        assert_eq!(language, FALLBACK_LANGUAGE);
    }

    #[test]
    fn detection_is_deterministic() {
        let text = "I cannot access my account and the application shows an error \
                    message every single time I try to log in from my computer";
        let first = detect_language(text);
        let second = detect_language(text);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn detects_english_paragraph() {
        let text = "Hello, I would like to request more information about your product \
                    pricing because we are evaluating several options for our company \
                    and your software seems to be the best choice for our team";
        assert_eq!(detect_language(text), "en");
    }

    #[test]
    fn output_is_lowercase_single_spaced() {
        let (cleaned, _) = normalizer()
            .normalize("URGENT    Problem\n\nWith   My PAYMENT please help")
            .unwrap();
        assert_eq!(cleaned, cleaned.to_lowercase());
        assert!(!cleaned.contains("  "));
        assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn collapse_whitespace_normalizes() {
        assert_eq!(
            collapse_whitespace("  Hello\n\n  WORLD\t again "),
            "hello world again"
        );
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn normalize_returns_a_language_code_for_any_input() {
        for input in ["", "...", "xyzzy", "12345 67890", "ol\u{00e1} tudo bem com voc\u{00ea}"] {
            let (_, language) = normalizer().normalize(input).unwrap();
            assert!(!language.is_empty(), "no language for {input:?}");
        }
    }
}
