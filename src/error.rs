use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure classes of the summary and dispatch pipelines.
///
/// `GenerationFailed` and `DeliveryFailed` are transient upstream failures
/// the caller may retry later. `PersistenceFailed` means the user-visible
/// action already happened but the audit write did not, so it is surfaced
/// separately rather than folded into a generic server error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Summary generation failed: {0}")]
    GenerationFailed(String),
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::warn!(%status, "{}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
