use serde::Serialize;
use thiserror::Error;

use crate::services::ServiceError;

/// Errors produced by the HTTP layer.
///
/// Every variant maps to exactly one response shape; see
/// `api::middleware::error_handler` for the status code and body of each.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be decoded into the expected structure
    #[error("Invalid JSON: {reason}")]
    InvalidJson { reason: String },

    /// The `{id}` path segment is not an integer
    #[error("Invalid user ID: '{raw}'")]
    InvalidUserId { raw: String },

    /// One or more field rules were violated
    #[error("Validation failed: {} violation(s)", .errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Client-visible failure carrying a message verbatim
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Resource or route not found
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The user listing could not be produced
    #[error("Failed to retrieve users")]
    ListFailed {
        #[source]
        source: ServiceError,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl AppError {
    /// Validation failure for a `T` request, errors in `T`'s field order.
    pub fn validation_failed<T: FieldOrder>(errors: &validator::ValidationErrors) -> Self {
        AppError::ValidationErrors {
            errors: ValidationFieldError::collect(errors, T::FIELDS),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

/// Declaration order of a request's fields, as named in JSON.
///
/// Validation errors are reported in this order. Fields missing from the
/// list come last, by name.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// The kind of rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    Email,
    /// Shorter than the given number of characters
    MinLength(u64),
    Other,
}

impl ViolationKind {
    /// Classifies a single `validator` error by its rule code.
    ///
    /// A `length` error only counts as `MinLength` when the offending value
    /// really is below the minimum; an overlong value is `Other`.
    pub fn classify(error: &validator::ValidationError) -> Self {
        match error.code.as_ref() {
            "required" => ViolationKind::Required,
            "email" => ViolationKind::Email,
            "length" => {
                let min = error.params.get("min").and_then(|v| v.as_u64());
                let len = error
                    .params
                    .get("value")
                    .and_then(|v| v.as_str())
                    .map(|s| s.chars().count() as u64);

                match (min, len) {
                    (Some(min), Some(len)) if len < min => ViolationKind::MinLength(min),
                    (Some(min), None) => ViolationKind::MinLength(min),
                    _ => ViolationKind::Other,
                }
            }
            _ => ViolationKind::Other,
        }
    }

    /// Human-readable message for a violation on `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            ViolationKind::Required => format!("{} is required", field),
            ViolationKind::Email => "Invalid email format".to_string(),
            ViolationKind::MinLength(min) => {
                format!("{} must be at least {} characters long", field, min)
            }
            ViolationKind::Other => format!("{} is invalid", field),
        }
    }
}

/// A single field-level validation failure as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl ValidationFieldError {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        let field = field.into();
        let message = kind.message(&field);
        Self { field, message }
    }

    /// Flattens `validator` output into one entry per violated rule,
    /// ordered by position in `order`, then rule order.
    pub fn collect(errors: &validator::ValidationErrors, order: &[&str]) -> Vec<Self> {
        let mut fields: Vec<(String, &Vec<validator::ValidationError>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect();
        fields.sort_by_cached_key(|(field, _)| {
            let rank = order.iter().position(|f| *f == field.as_str()).unwrap_or(order.len());
            (rank, field.clone())
        });

        fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(move |e| Self::new(field.clone(), ViolationKind::classify(e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    #[derive(Debug, Validate)]
    struct Signup {
        #[validate(required, length(min = 2))]
        name: Option<String>,
        #[validate(required, email)]
        email: Option<String>,
        #[validate(length(min = 3, max = 5))]
        code: String,
    }

    impl FieldOrder for Signup {
        const FIELDS: &'static [&'static str] = &["name", "email", "code"];
    }

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(
            ViolationKind::classify(&ValidationError::new("required")),
            ViolationKind::Required
        );
        assert_eq!(
            ViolationKind::classify(&ValidationError::new("email")),
            ViolationKind::Email
        );
        assert_eq!(
            ViolationKind::classify(&ValidationError::new("range")),
            ViolationKind::Other
        );
    }

    #[test]
    fn test_classify_length_without_value_uses_min() {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::from("min"), &8);
        assert_eq!(ViolationKind::classify(&error), ViolationKind::MinLength(8));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ViolationKind::Required.message("email"), "email is required");
        assert_eq!(ViolationKind::Email.message("email"), "Invalid email format");
        assert_eq!(
            ViolationKind::MinLength(8).message("password"),
            "password must be at least 8 characters long"
        );
        assert_eq!(ViolationKind::Other.message("code"), "code is invalid");
    }

    #[test]
    fn test_collect_one_entry_per_missing_field() {
        let signup = Signup {
            name: None,
            email: None,
            code: "abcd".to_string(),
        };
        let errors =
            ValidationFieldError::collect(&signup.validate().unwrap_err(), Signup::FIELDS);

        assert_eq!(
            errors,
            vec![
                ValidationFieldError::new("name", ViolationKind::Required),
                ValidationFieldError::new("email", ViolationKind::Required),
            ]
        );
    }

    #[test]
    fn test_collect_format_and_length() {
        let signup = Signup {
            name: Some("a".to_string()),
            email: Some("not-an-email".to_string()),
            code: "abcdefg".to_string(),
        };
        let errors =
            ValidationFieldError::collect(&signup.validate().unwrap_err(), Signup::FIELDS);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].message, "name must be at least 2 characters long");
        assert_eq!(errors[1].message, "Invalid email format");
        assert_eq!(errors[2].field, "code");
        assert_eq!(errors[2].message, "code is invalid");
    }

    #[test]
    fn test_collect_unlisted_fields_go_last_by_name() {
        let signup = Signup {
            name: None,
            email: None,
            code: "abcdefg".to_string(),
        };
        let errors = ValidationFieldError::collect(&signup.validate().unwrap_err(), &["email"]);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "code", "name"]);
    }

    #[test]
    fn test_validation_failed_uses_field_order() {
        let signup = Signup {
            name: Some("ok".to_string()),
            email: None,
            code: "abc".to_string(),
        };
        let error = AppError::validation_failed::<Signup>(&signup.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "email is required");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }
}
