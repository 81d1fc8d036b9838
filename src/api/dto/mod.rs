//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `envelope` - The uniform `{success, message, data, error}` wrapper
//! - `pagination` - Query parsing and the paged listing body

mod envelope;
mod pagination;
mod user;

pub use envelope::{ApiResponse, ValidationErrorBody};
pub use pagination::{DEFAULT_LIMIT, PagedUsersResponse, PaginationParams};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
