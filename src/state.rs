//! Application state for Axum web framework.
//!
//! Holds the user service the handlers delegate to.

use std::sync::Arc;

use crate::services::{InMemoryUserService, UserService};

/// Application state shared by all request handlers.
///
/// Cloning is cheap; the service is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
}

impl AppState {
    /// Creates state around an existing user service.
    ///
    /// # Example
    /// ```ignore
    /// let state = AppState::new(Arc::new(InMemoryUserService::new()));
    /// ```
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }

    /// State backed by a fresh process-local user store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserService::new()))
    }
}
