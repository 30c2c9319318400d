use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the matching engine.
///
/// `JobNotFound` and `Storage` end the whole run. The other three are scoped to
/// a single candidate: the orchestrator logs them, records a skip, and moves on.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    #[error("Scoring service unavailable: {0}")]
    ScoringUnavailable(String),

    #[error("Unparseable match response: {0}")]
    MatchUnparseable(String),

    #[error("Failed to persist match: {0}")]
    PersistenceFailure(String),
}

/// Stable machine-readable label for a `MatchError`, used in skip records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchErrorKind {
    JobNotFound,
    Storage,
    ScoringUnavailable,
    MatchUnparseable,
    PersistenceFailure,
}

impl MatchError {
    pub fn kind(&self) -> MatchErrorKind {
        match self {
            MatchError::JobNotFound(_) => MatchErrorKind::JobNotFound,
            MatchError::Storage(_) => MatchErrorKind::Storage,
            MatchError::ScoringUnavailable(_) => MatchErrorKind::ScoringUnavailable,
            MatchError::MatchUnparseable(_) => MatchErrorKind::MatchUnparseable,
            MatchError::PersistenceFailure(_) => MatchErrorKind::PersistenceFailure,
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::JobNotFound(id) => AppError::NotFound(format!("Job {id} not found")),
            MatchError::Storage(e) => AppError::Internal(e),
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
