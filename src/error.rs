use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Domain-level failures. Every variant aborts its transaction with a full
/// rollback; the web layer translates them into responses below.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user is already registered for this activity")]
    AlreadyRegistered,

    #[error("activity already has the maximum number of participants")]
    ActivityFull,

    #[error("user is not registered for this activity")]
    NotRegistered,

    #[error("registration is already cancelled")]
    AlreadyLeft,

    #[error("activity is not in a state that allows this transition")]
    InvalidTransition,

    #[error("feedback for this participant and activity already exists")]
    DuplicateFeedback,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    fn code(&self) -> &'static str {
        match self {
            ServiceError::AlreadyRegistered => "ALREADY_REGISTERED",
            ServiceError::ActivityFull => "ACTIVITY_FULL",
            ServiceError::NotRegistered => "NOT_REGISTERED",
            ServiceError::AlreadyLeft => "ALREADY_LEFT",
            ServiceError::InvalidTransition => "INVALID_TRANSITION",
            ServiceError::DuplicateFeedback => "DUPLICATE_FEEDBACK",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::AlreadyRegistered
            | ServiceError::ActivityFull
            | ServiceError::AlreadyLeft
            | ServiceError::InvalidTransition
            | ServiceError::DuplicateFeedback => StatusCode::CONFLICT,
            ServiceError::NotRegistered => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(ref e) => {
                tracing::warn!("database error reached the web layer: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
