//! Classification orchestrator — one classify-and-respond operation
//! per email.
//!
//! Flow: normalize → build prompt → completion call → parse JSON →
//! validate → accept or fall back. Parse and validation failures are
//! recovered locally with catalog templates; preprocessing and gateway
//! failures propagate.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::llm::{ChatMessage, CompletionGateway, CompletionRequest};
use crate::nlp::{ModelCache, TextNormalizer};
use crate::pipeline::types::{ClassificationResult, Email, FallbackReason, Outcome};
use crate::pipeline::validator::DraftResponse;
use crate::pipeline::{fallback, prompt};
use crate::templates::{Category, TemplateCatalog};

/// Sampling temperature — low but nonzero, favoring consistency over
/// creativity.
const COMPLETION_TEMPERATURE: f32 = 0.3;

/// Output-token ceiling for one draft reply.
const COMPLETION_MAX_TOKENS: u32 = 600;

/// Email classification pipeline.
///
/// Holds the long-lived collaborators (gateway handle, model cache,
/// template catalog); per-request state never outlives one call.
pub struct Classifier {
    gateway: Arc<dyn CompletionGateway>,
    normalizer: TextNormalizer,
    catalog: Arc<TemplateCatalog>,
}

impl Classifier {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        models: Arc<ModelCache>,
        catalog: Arc<TemplateCatalog>,
    ) -> Self {
        Self {
            gateway,
            normalizer: TextNormalizer::new(models),
            catalog,
        }
    }

    /// Classify one email and draft a reply.
    ///
    /// The only error paths are preprocessing failure and gateway
    /// failure; unusable model output always degrades to a fallback
    /// template.
    pub async fn classify_and_respond(&self, email: &Email) -> Result<Outcome, PipelineError> {
        let original_text = email.as_message_text();
        let (cleaned_text, language) = self.normalizer.normalize(&original_text)?;

        let instruction = prompt::build(&language, &self.catalog);
        let request = CompletionRequest::new(vec![
            ChatMessage::system(instruction),
            ChatMessage::user(prompt::build_user_message(&original_text, &cleaned_text)),
        ])
        .with_temperature(COMPLETION_TEMPERATURE)
        .with_max_tokens(COMPLETION_MAX_TOKENS)
        .with_json_response();

        let response = self.gateway.complete(request).await?;

        let draft: DraftResponse =
            match serde_json::from_str(&extract_json_object(&response.content)) {
                Ok(draft) => draft,
                Err(e) => {
                    warn!(
                        language = %language,
                        error = %e,
                        "Completion was not a JSON object, using fallback template"
                    );
                    return Ok(Outcome::Fallback(
                        self.fallback_result(&language, Category::TechnicalSupport, email),
                        FallbackReason::UnparsableOutput,
                    ));
                }
            };

        if let Some((is_productive, category, subject, body)) = draft.to_validated() {
            info!(
                is_productive,
                category = %category,
                language = %language,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Classification complete"
            );
            return Ok(Outcome::Accepted(ClassificationResult {
                is_productive,
                category: Some(category),
                suggested_subject: subject,
                suggested_body: body,
                detected_language: language,
                original_email: email.clone(),
            }));
        }

        let category = proposed_category(&draft);
        warn!(
            language = %language,
            category = %category,
            "Completion failed validation, using fallback template"
        );
        Ok(Outcome::Fallback(
            self.fallback_result(&language, category, email),
            FallbackReason::InvalidOutput,
        ))
    }

    /// Classify a batch strictly in input order, one at a time.
    ///
    /// The first preprocessing or gateway failure aborts the remainder
    /// of the batch.
    pub async fn classify_batch(&self, emails: &[Email]) -> Result<Vec<Outcome>, PipelineError> {
        let mut outcomes = Vec::with_capacity(emails.len());
        for email in emails {
            outcomes.push(self.classify_and_respond(email).await?);
        }
        Ok(outcomes)
    }

    /// Assemble a guaranteed-valid result from the catalog.
    fn fallback_result(
        &self,
        language: &str,
        category: Category,
        email: &Email,
    ) -> ClassificationResult {
        let (resolved, template) = fallback::select(&self.catalog, language, Some(category));
        ClassificationResult {
            is_productive: resolved.is_productive(),
            category: Some(resolved),
            suggested_subject: template.subject.to_string(),
            suggested_body: template.body.to_string(),
            detected_language: language.to_string(),
            original_email: email.clone(),
        }
    }
}

/// Category to fall back on when validation rejects the draft.
///
/// A proposed-but-unknown category resolves to `technical_support`;
/// an absent one derives from the productivity flag (`greeting` when
/// the model said the email needs no action).
fn proposed_category(draft: &DraftResponse) -> Category {
    match draft.category.as_deref() {
        Some(raw) => Category::parse(raw).unwrap_or(Category::TechnicalSupport),
        None => match draft.is_productive {
            Some(false) => Category::Greeting,
            _ => Category::TechnicalSupport,
        },
    }
}

/// Extract a JSON object from completion output. Providers in JSON
/// mode return a bare object, but a drifting model may still wrap it
/// in markdown or surrounding prose.
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && end > start
    {
        return trimmed[start..=end].to_string();
    }

    trimmed.to_string()
}
