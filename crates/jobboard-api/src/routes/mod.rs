//! API routes.

pub mod admin;
pub mod apply;
pub mod health;
pub mod jobs;

use axum::Router;
use axum::routing::post;

use crate::AppState;

/// Build the main API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router())
        .merge(health::router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/jobs", jobs::router())
        .route("/apply", post(apply::submit))
        .nest("/admin", admin::router())
}
