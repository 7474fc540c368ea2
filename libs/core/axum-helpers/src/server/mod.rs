//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with the OpenAPI document, fallbacks, tracing and timeouts
//! - Serving on TCP or a Unix domain socket
//! - Health and readiness endpoints
//! - Graceful shutdown with bounded cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let app = create_router::<ApiDoc>(api_routes, &config).merge(health_router(app_info!()));
//!
//! create_production_app(app, &config, DEFAULT_SHUTDOWN_TIMEOUT, async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{
    DEFAULT_SHUTDOWN_TIMEOUT, OPENAPI_PATH, create_app, create_production_app, create_router,
    serve_until,
};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
