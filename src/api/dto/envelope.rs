//! Response envelope DTOs.

use serde::Serialize;

use crate::error::ValidationFieldError;

/// Standard response format shared by every user endpoint except the listing.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a payload.
    pub fn done(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            error: None,
        }
    }

    /// Failed response with only a message.
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: None,
        }
    }

    /// Failed response listing every violated field rule.
    pub fn validation_failed(errors: Vec<ValidationFieldError>) -> Self {
        Self {
            success: false,
            message: ValidationErrorBody::MESSAGE.to_string(),
            data: None,
            error: Some(ValidationErrorBody::new(errors)),
        }
    }
}

/// Payload of the `error` field on a validation failure.
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    pub success: bool,
    pub message: String,
    pub errors: Vec<ValidationFieldError>,
}

impl ValidationErrorBody {
    pub const MESSAGE: &'static str = "Validation failed";

    pub fn new(errors: Vec<ValidationFieldError>) -> Self {
        Self {
            success: false,
            message: Self::MESSAGE.to_string(),
            errors,
        }
    }
}
