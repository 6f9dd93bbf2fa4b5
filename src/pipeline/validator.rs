//! Quality gate for parsed model output.

use serde::Deserialize;

use crate::templates::Category;

/// Minimum length of a usable suggested body.
pub const MIN_BODY_CHARS: usize = 50;

/// Minimum length of a usable suggested subject.
pub const MIN_SUBJECT_CHARS: usize = 5;

/// Model output as parsed from the completion text. Every field is
/// optional here — presence is part of what validation checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftResponse {
    #[serde(default)]
    pub is_productive: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub suggested_subject: Option<String>,
    #[serde(default)]
    pub suggested_body: Option<String>,
}

impl DraftResponse {
    /// Extract the validated fields. `None` unless [`validate`] holds.
    pub fn to_validated(&self) -> Option<(bool, Category, String, String)> {
        if !validate(self) {
            return None;
        }
        let category = Category::parse(self.category.as_deref()?)?;
        Some((
            self.is_productive?,
            category,
            self.suggested_subject.clone()?,
            self.suggested_body.clone()?,
        ))
    }
}

/// Pure predicate over a parsed draft. Passes iff all required fields
/// are present, the subject and body meet the minimum lengths, and the
/// category belongs to the closed six-value set.
///
/// Failure is a routing signal (→ fallback template), not an error.
pub fn validate(draft: &DraftResponse) -> bool {
    if draft.is_productive.is_none() {
        return false;
    }

    let Some(category) = draft.category.as_deref() else {
        return false;
    };
    if Category::parse(category).is_none() {
        return false;
    }

    let Some(subject) = draft.suggested_subject.as_deref() else {
        return false;
    };
    if subject.chars().count() < MIN_SUBJECT_CHARS {
        return false;
    }

    let Some(body) = draft.suggested_body.as_deref() else {
        return false;
    };
    if body.chars().count() < MIN_BODY_CHARS {
        return false;
    }

    true
}
