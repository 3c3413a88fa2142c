//! Public listing endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;
use jobboard_core::JobListing;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_jobs))
}

#[derive(Debug, Serialize)]
struct JobsResponse {
    jobs: Vec<JobListing>,
}

async fn list_jobs(State(state): State<AppState>) -> Result<Json<JobsResponse>, ApiError> {
    let jobs = state.stores.jobs.list().await?;
    Ok(Json(JobsResponse { jobs }))
}
