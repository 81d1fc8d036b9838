//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure the API reports goes through here, so status codes and
//! body shapes stay consistent across handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ApiResponse;
use crate::api::response::json_response;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - InvalidJson → 400 `{"success":false,"message":"Invalid JSON"}`
    /// - InvalidUserId → 400 `"Invalid user ID"`
    /// - ValidationErrors → 400 with the field errors nested in `error`
    /// - BadRequest → 400 with the message verbatim
    /// - NotFound → 404 with the message verbatim
    /// - ListFailed → 500 plain text `Failed to retrieve users`
    /// - Internal → 500 `"Internal server error"`
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        match self {
            AppError::InvalidJson { reason } => {
                tracing::debug!(reason = %reason, "Rejected request body");
                json_response(status, &ApiResponse::failure("Invalid JSON"))
            }
            AppError::InvalidUserId { raw } => {
                tracing::debug!(raw = %raw, "Rejected user id");
                json_response(status, &ApiResponse::failure("Invalid user ID"))
            }
            AppError::ValidationErrors { errors } => {
                json_response(status, &ApiResponse::validation_failed(errors))
            }
            AppError::BadRequest { message } | AppError::NotFound { message } => {
                json_response(status, &ApiResponse::failure(&message))
            }
            AppError::ListFailed { source } => {
                tracing::error!(error = %source, "Failed to list users");
                (status, "Failed to retrieve users").into_response()
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                json_response(status, &ApiResponse::failure("Internal server error"))
            }
        }
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::InvalidJson { .. }
        | AppError::InvalidUserId { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::ListFailed { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> AppError {
    AppError::NotFound {
        message: "Route not found".to_string(),
    }
}
