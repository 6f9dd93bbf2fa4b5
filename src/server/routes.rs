//! REST endpoints for email processing.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::pipeline::{ClassificationResult, Classifier, Outcome};

/// Maximum number of emails per request.
pub const MAX_BATCH_SIZE: usize = 10;

/// Shared state for the API routes.
#[derive(Clone)]
pub struct ApiState {
    pub classifier: Arc<Classifier>,
}

/// Batch request body: 1–10 emails.
#[derive(Debug, Deserialize)]
pub struct ProcessEmailRequest {
    pub emails: Vec<crate::pipeline::Email>,
}

/// API-level error with its HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request must contain between 1 and {MAX_BATCH_SIZE} emails, got {0}")]
    InvalidBatch(usize),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(PipelineError::Nlp(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(PipelineError::Llm(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidBatch(_) => "InvalidBatch",
            ApiError::Pipeline(PipelineError::Nlp(_)) => "NlpProcessingError",
            ApiError::Pipeline(PipelineError::Llm(_)) => "LlmServiceError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(code = self.code(), error = %self, "Handled request error");
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}

/// POST /process-email
///
/// Classifies each email and returns one result per input, in input
/// order. Items are processed strictly one at a time; a gateway
/// failure aborts the whole batch (no partial results).
async fn process_email(
    State(state): State<ApiState>,
    Json(request): Json<ProcessEmailRequest>,
) -> Result<Json<Vec<ClassificationResult>>, ApiError> {
    let count = request.emails.len();
    if count == 0 || count > MAX_BATCH_SIZE {
        return Err(ApiError::InvalidBatch(count));
    }

    let outcomes = state.classifier.classify_batch(&request.emails).await?;

    let fallbacks = outcomes.iter().filter(|o| o.is_fallback()).count();
    info!(count, fallbacks, "Processed email batch");

    Ok(Json(outcomes.into_iter().map(Outcome::into_result).collect()))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Build the API router.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/process-email", post(process_email))
        .route("/health", get(health))
        .with_state(state)
}
