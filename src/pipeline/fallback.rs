//! Deterministic fallback template selection.

use crate::templates::{Category, ResponseTemplate, TemplateCatalog};

/// Default catalog language when the detected one has no entries.
const FALLBACK_CATALOG_LANGUAGE: &str = "pt";

/// Default category when none was proposed or the proposed one has no
/// template for the resolved language.
const FALLBACK_CATEGORY: Category = Category::TechnicalSupport;

/// Select the fallback template for `(language, category)`.
///
/// Total function — it always resolves to a template:
/// - a language without catalog entries resolves to `"pt"`
/// - a missing category (or one absent for the resolved language)
///   resolves to `technical_support`
///
/// Returns the resolved category alongside its template; productivity
/// is derived from the category, never stored.
pub fn select(
    catalog: &TemplateCatalog,
    language: &str,
    category: Option<Category>,
) -> (Category, ResponseTemplate) {
    let language = if catalog.has_language(language) {
        language
    } else {
        FALLBACK_CATALOG_LANGUAGE
    };

    let category = category
        .filter(|c| catalog.get(language, *c).is_some())
        .unwrap_or(FALLBACK_CATEGORY);

    // Both built-in languages carry all six categories, and unknown
    // languages resolved to "pt" above, so the lookup cannot miss; the
    // final unwrap_or keeps the function total even if the catalog
    // shrinks.
    let template = catalog
        .get(language, category)
        .or_else(|| catalog.get(FALLBACK_CATALOG_LANGUAGE, FALLBACK_CATEGORY))
        .unwrap_or(ResponseTemplate {
            subject: "Re: Your Support Request",
            body: "Dear customer,\n\nWe have received your message and our team \
                   will get back to you shortly.\n\nBest regards,\nSupport Team",
        });

    (category, template)
}
