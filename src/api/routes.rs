//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware, route_not_found};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run in reverse order of declaration (last added runs first):
/// 1. CORS - answers preflight requests before anything else
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - logs requests with their request ID
///
/// # Routes
/// - `/api/users` - User CRUD operations
/// - `/health` - Health check
///
/// Anything else gets a 404 "Route not found" envelope.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().nest("/users", handlers::users::user_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .fallback(route_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
