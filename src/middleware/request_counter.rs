use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::routes::AppState;

/// Middleware that counts every inbound request before it is routed.
///
/// Runs ahead of authentication, so rejected and unknown requests are counted
/// too. Counter failures are logged and the request proceeds.
pub async fn count_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(e) = state.counter.increment().await {
        tracing::warn!(error = %e, "Failed to increment request counter");
    }

    next.run(request).await
}
