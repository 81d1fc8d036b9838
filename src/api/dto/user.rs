//! User-related DTOs for API requests and responses.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::FieldOrder;
use crate::models::{NewUser, UpdateUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required, length(min = 2))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required, email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required, length(min = 8))]
    pub password: Option<String>,
}

impl FieldOrder for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "password"];
}

impl CreateUserRequest {
    /// Converts a validated request into a NewUser.
    ///
    /// Validation guarantees every field is present.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

/// Request body for updating a user. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 2))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

impl FieldOrder for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "password"];
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

// An empty string is treated the same as a missing field.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data (excludes the password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
