//! # Axum Helpers
//!
//! Shared building blocks for the Axum HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, TCP/Unix serving, health checks, graceful shutdown
//! - **[`errors`]**: The `AppError` → HTTP response translation and its error body
//! - **[`extractors`]**: Custom extractors (path identifier, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config);
//!     create_app(router, &config).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export server types
pub use server::{
    DEFAULT_SHUTDOWN_TIMEOUT, HealthCheckFuture, HealthResponse, create_app,
    create_production_app, create_router, health_router, run_health_checks, serve_until,
    shutdown_signal,
};

// Re-export error types
pub use errors::{AppError, ApplicationError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
