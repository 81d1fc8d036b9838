use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::{AppError, AppResult};

/// The `{id}` path segment parsed as an integer.
///
/// Being a parts extractor, it runs before any body extractor, so an
/// invalid id is reported without reading the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let raw = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(raw)| raw)
            .unwrap_or_default();

        raw.parse::<i64>()
            .map(UserId)
            .map_err(|_| AppError::InvalidUserId { raw })
    }
}
