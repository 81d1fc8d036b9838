//! User CRUD request handlers.
//!
//! Each handler decodes and validates its input, calls the user service and
//! maps the outcome to a response. No business rules live here.

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
    routing::get,
};

use crate::api::dto::{
    ApiResponse, CreateUserRequest, PagedUsersResponse, PaginationParams, UpdateUserRequest,
    UserResponse,
};
use crate::api::response::json_response;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::{UserId, ValidatedJson};

/// Creates user-related routes.
///
/// Routes:
/// - GET /         - List users (paginated)
/// - POST /        - Create a new user
/// - GET /{id}     - Get user by ID
/// - PUT /{id}     - Update user by ID
/// - DELETE /{id}  - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route(
            "/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}

/// POST /api/users - Create new user
///
/// Returns 201 with the created user. Service failures are reported as 400
/// with the service's message.
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Response> {
    let user = state
        .users
        .create_user(payload.into_new_user())
        .await
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    tracing::info!(user_id = user.id, "User created");
    Ok(json_response(
        StatusCode::CREATED,
        &ApiResponse::ok(UserResponse::from(user), "User created successfully"),
    ))
}

/// GET /api/users/{id} - Get user by ID
///
/// Any service failure is reported as 404 "User not found".
async fn get_user_by_id(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Response> {
    let user = state.users.get_user_by_id(id).await.map_err(|e| {
        tracing::debug!(user_id = id, error = %e, "User lookup failed");
        AppError::NotFound {
            message: "User not found".to_string(),
        }
    })?;

    Ok(json_response(
        StatusCode::OK,
        &ApiResponse::ok(UserResponse::from(user), "User retrieved successfully"),
    ))
}

/// GET /api/users?limit=&offset= - List users
///
/// Unusable pagination values fall back to defaults instead of failing.
/// The body is not wrapped in the response envelope.
async fn get_all_users(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Response> {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let params = PaginationParams::from_query(&pairs);

    let (users, total_count) = state
        .users
        .get_all_users(params.limit, params.offset)
        .await
        .map_err(|source| AppError::ListFailed { source })?;

    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(json_response(
        StatusCode::OK,
        &PagedUsersResponse::new(data, total_count, params),
    ))
}

/// PUT /api/users/{id} - Update user
///
/// The path ID is checked before the body is read.
async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Response> {
    let user = state
        .users
        .update_user(id, payload.into_update_user())
        .await
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    tracing::info!(user_id = user.id, "User updated");
    Ok(json_response(
        StatusCode::OK,
        &ApiResponse::ok(UserResponse::from(user), "User updated successfully"),
    ))
}

/// DELETE /api/users/{id} - Delete user
///
/// Any service failure is reported as 404 with the service's message.
async fn delete_user(State(state): State<AppState>, UserId(id): UserId) -> AppResult<Response> {
    state
        .users
        .delete_user(id)
        .await
        .map_err(|e| AppError::NotFound {
            message: e.to_string(),
        })?;

    tracing::info!(user_id = id, "User deleted");
    Ok(json_response(
        StatusCode::OK,
        &ApiResponse::done("User deleted successfully"),
    ))
}
