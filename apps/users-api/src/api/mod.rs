//! API routes module
//!
//! This module defines all HTTP routes of the users service. Users routes are
//! served at the root (`/users`, `/users/{id}`), next to `/health` and
//! `/ready`.

pub mod health;
pub mod users;

use axum::Router;
use axum_helpers::server::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
