use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{count_requests, require_auth};

pub mod auth;
pub mod collections;
mod extract;
pub mod movies;
pub mod request_count;
mod state;

pub use extract::{AppJson, AppQuery, CollectionUuid};
pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/token/refresh", post(auth::refresh))
        .merge(protected_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), count_requests)),
        )
        .with_state(state)
}

/// Routes that require a bearer access token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list))
        .route(
            "/collection",
            get(collections::list)
                .post(collections::create)
                .put(collections::missing_uuid)
                .delete(collections::missing_uuid),
        )
        .route(
            "/collection/:collection_uuid",
            get(collections::detail)
                .post(collections::add_movies)
                .put(collections::update)
                .delete(collections::remove),
        )
        .route("/request-count", get(request_count::read))
        .route("/request-count/reset", post(request_count::reset))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
