use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult, FieldOrder};

fn invalid_json(e: serde_json::Error) -> AppError {
    AppError::InvalidJson {
        reason: e.to_string(),
    }
}

/// Decodes the first JSON value in `body`.
///
/// Anything after that value is ignored. An empty body is an error. A
/// literal `null` decodes to `T::default()`, and a repeated object key keeps
/// its last value.
fn decode_first_json<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    let value = match serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
    {
        Some(value) => value.map_err(invalid_json)?,
        None => {
            return Err(AppError::InvalidJson {
                reason: "empty body".to_string(),
            });
        }
    };

    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(invalid_json)
}

/// JSON body extractor that also runs `validator` rules.
///
/// The `Content-Type` header is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Default + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidJson {
                reason: e.body_text(),
            })?;

        let value: T = decode_first_json(&body)?;
        value
            .validate()
            .map_err(|e| AppError::validation_failed::<T>(&e))?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Validate)]
    struct TestBody {
        #[validate(required, length(min = 3))]
        username: Option<String>,
        #[validate(required, email)]
        email: Option<String>,
    }

    impl FieldOrder for TestBody {
        const FIELDS: &'static [&'static str] = &["username", "email"];
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let result = ValidatedJson::<TestBody>::from_request(
            request(r#"{"username":"testuser","email":"test@example.com"}"#),
            &(),
        )
        .await;

        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.username.as_deref(), Some("testuser"));
        assert_eq!(body.email.as_deref(), Some("test@example.com"));
    }

    #[tokio::test]
    async fn test_content_type_not_required() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"username":"testuser","email":"a@b.co"}"#))
            .unwrap();

        assert!(
            ValidatedJson::<TestBody>::from_request(request, &())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_trailing_data_ignored() {
        let result = ValidatedJson::<TestBody>::from_request(
            request(r#"{"username":"testuser","email":"a@b.co"} trailing garbage"#),
            &(),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        for body in ["", "   ", "{", "not json", r#"{"username": 5}"#] {
            let error = ValidatedJson::<TestBody>::from_request(request(body), &())
                .await
                .unwrap_err();
            assert!(
                matches!(error, AppError::InvalidJson { .. }),
                "body {:?} gave {:?}",
                body,
                error
            );
        }
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let error = ValidatedJson::<TestBody>::from_request(
            request(r#"{"username":"ab","email":"invalid-email"}"#),
            &(),
        )
        .await
        .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "username");
                assert_eq!(
                    errors[0].message,
                    "username must be at least 3 characters long"
                );
                assert_eq!(errors[1].field, "email");
                assert_eq!(errors[1].message, "Invalid email format");
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_missing_fields_are_required_violations() {
        let error = ValidatedJson::<TestBody>::from_request(request("{}"), &())
            .await
            .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(messages, vec!["username is required", "email is required"]);
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_null_body_is_validated_as_empty() {
        let error = ValidatedJson::<TestBody>::from_request(request("null"), &())
            .await
            .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["username", "email"]);
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[test]
    fn test_duplicate_keys_keep_last_value() {
        let body: TestBody =
            decode_first_json(br#"{"username":"first","username":"second","email":"a@b.co"}"#)
                .unwrap();
        assert_eq!(body.username.as_deref(), Some("second"));
    }

    #[test]
    fn test_non_object_values_are_invalid_json() {
        for body in [&b"5"[..], b"[]", br#""text""#] {
            assert!(matches!(
                decode_first_json::<TestBody>(body),
                Err(AppError::InvalidJson { .. })
            ));
        }
    }
}
