//! Service layer for user operations.
//!
//! Handlers depend only on the [`UserService`] trait; the storage behind it
//! is chosen when `AppState` is built.

mod memory;
mod user_service;

pub use memory::InMemoryUserService;
pub use user_service::{ServiceError, UserService};
