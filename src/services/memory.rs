use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use super::user_service::{ServiceError, UserService};
use crate::models::{NewUser, UpdateUser, User};
use crate::utils::password::hash_password;

/// Process-local user store.
///
/// Ids are assigned sequentially from 1 and never reused. Email addresses
/// are unique ignoring ASCII case.
#[derive(Debug, Default)]
pub struct InMemoryUserService {
    store: RwLock<UserStore>,
}

#[derive(Debug)]
struct UserStore {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl UserStore {
    fn email_owner(&self, email: &str) -> Option<i64> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.id)
    }
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

// Argon2 is CPU bound; keep it off the async workers and outside the lock.
async fn hash_off_thread(password: String) -> Result<String, ServiceError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task failed")??;
    Ok(hashed)
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User, ServiceError> {
        let password_hash = hash_off_thread(new_user.password).await?;

        let mut store = self.store.write().await;
        if store.email_owner(&new_user.email).is_some() {
            return Err(ServiceError::EmailTaken {
                email: new_user.email,
            });
        }

        let id = store.next_id;
        store.next_id += 1;

        let now = Timestamp::now();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        store.users.insert(id, user.clone());

        tracing::debug!(user_id = id, "User stored");
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, ServiceError> {
        self.store
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound { id })
    }

    async fn get_all_users(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), ServiceError> {
        let store = self.store.read().await;
        let total = store.users.len() as i64;

        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let page = store.users.values().skip(skip).take(take).cloned().collect();

        Ok((page, total))
    }

    async fn update_user(&self, id: i64, update: UpdateUser) -> Result<User, ServiceError> {
        let password_hash = match update.password {
            Some(password) => Some(hash_off_thread(password).await?),
            None => None,
        };

        let mut store = self.store.write().await;
        if !store.users.contains_key(&id) {
            return Err(ServiceError::NotFound { id });
        }

        if let Some(email) = &update.email {
            if store.email_owner(email).is_some_and(|owner| owner != id) {
                return Err(ServiceError::EmailTaken {
                    email: email.clone(),
                });
            }
        }

        let user = store
            .users
            .get_mut(&id)
            .ok_or(ServiceError::NotFound { id })?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Timestamp::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        self.store
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound { id })
    }
}
