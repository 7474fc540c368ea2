//! MongoDB connector and utilities
//!
//! Builds the driver client from [`MongoConfig`], verifies it with a `ping`
//! and exposes health checks for readiness probes.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_COLLECTION, MongoConfig};
pub use connector::{MongoError, client_options, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
