//! Readiness endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Create the `/ready` router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies the MongoDB connection with a ping
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = database::mongodb::check_health_detailed(&state.mongo_client).await;
        match status.healthy {
            true => Ok(()),
            false => Err(status.message.unwrap_or_default()),
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
