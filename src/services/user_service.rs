//! User service contract.
//!
//! Errors carry a client-safe `Display` text; handlers forward it verbatim
//! for create, update and delete failures.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, UpdateUser, User};

/// Failures reported by a [`UserService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("user with id {id} not found")]
    NotFound { id: i64 },

    #[error("email already in use: {email}")]
    EmailTaken { email: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Business operations on users.
///
/// Implementations must be safe to share across request tasks. Dropping a
/// returned future abandons the operation.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Stores a new user and returns it with its assigned id.
    async fn create_user(&self, new_user: NewUser) -> Result<User, ServiceError>;

    async fn get_user_by_id(&self, id: i64) -> Result<User, ServiceError>;

    /// Returns one page of users ordered by id, plus the total user count.
    async fn get_all_users(&self, limit: i64, offset: i64)
    -> Result<(Vec<User>, i64), ServiceError>;

    /// Applies the present fields of `update` and returns the updated user.
    async fn update_user(&self, id: i64, update: UpdateUser) -> Result<User, ServiceError>;

    async fn delete_user(&self, id: i64) -> Result<(), ServiceError>;
}
