//! Domain error to HTTP response mapping

use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::Pricing(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
    }
}

pub fn domain_error(err: DomainError) -> ApiError {
    let status = status_for(&err);
    debug!(status = status.as_u16(), error = %err, "request failed");
    (status, Json(ApiResponse::error(err.to_string())))
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}
