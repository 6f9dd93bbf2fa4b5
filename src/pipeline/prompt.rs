//! Classification prompt construction.
//!
//! The instruction is a pure function of `(language, catalog)` —
//! identical inputs always produce an identical string, which keeps
//! the single completion call as reproducible as the provider allows.

use crate::templates::{Category, TemplateCatalog};

/// Categories used as few-shot examples. A fixed small subset — not
/// the full catalog — to bound prompt size.
pub const FEW_SHOT_CATEGORIES: [Category; 3] = [
    Category::PaymentIssue,
    Category::TechnicalSupport,
    Category::Greeting,
];

/// Build the system instruction for the detected language.
///
/// Contains the fixed category list, the formatting rules, and
/// few-shot examples drawn only from the detected language's catalog
/// entries. A language without catalog entries yields an empty example
/// section but a still well-formed instruction.
pub fn build(language: &str, catalog: &TemplateCatalog) -> String {
    let categories = Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(" | ");

    let mut examples = String::new();
    for category in FEW_SHOT_CATEGORIES {
        if let Some(template) = catalog.get(language, category) {
            examples.push_str(&format!(
                "{}: {{\"is_productive\": {}, \"category\": \"{}\", \"suggested_subject\": \"{}\"}}\n",
                category.as_str(),
                category.is_productive(),
                category.as_str(),
                template.subject,
            ));
        }
    }

    format!(
        "You are a Customer Support AI. Analyze emails and draft professional responses.\n\n\
         CATEGORIES:\n{categories}\n\n\
         INSTRUCTIONS:\n\
         1. Identify category from list above\n\
         2. Use CLEANED text for analysis, ORIGINAL for personalization (names, numbers)\n\
         3. Respond as the appropriate team (Financial/Technical/Customer Service)\n\
         4. Tone: Professional and empathetic (adjust by category)\n\
         5. Structure: 3 paragraphs, 100-250 words\n\
         6. is_productive=true for: payment_issue, technical_support, information_request, complaint\n\n\
         EXAMPLES:\n{examples}\n\
         Return JSON: is_productive (bool), category (string), suggested_subject, suggested_body."
    )
}

/// Build the user message carrying both the original and the cleaned
/// text — the model analyzes the cleaned form but personalizes from
/// the original (names, order numbers).
pub fn build_user_message(original_text: &str, cleaned_text: &str) -> String {
    format!("Original email:\n{original_text}\n\nCleaned text for analysis:\n{cleaned_text}")
}
