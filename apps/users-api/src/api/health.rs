//! Readiness endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings MongoDB; 503 while it is unreachable
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        let status = check_health_detailed(&state.db).await;
        tracing::debug!(
            healthy = status.healthy,
            response_time_ms = status.response_time_ms,
            "MongoDB ping"
        );
        status.message.map_or(Ok(()), Err)
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
