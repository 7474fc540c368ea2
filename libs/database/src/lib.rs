//! Database connectors
//!
//! # Features
//!
//! - `mongodb` - MongoDB client construction, retrying connect and health checks
//! - `config` - `core_config::FromEnv` support for the connector configs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::new("localhost", 27017, "app");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let users = client
//!     .database(config.database())
//!     .collection::<Document>(config.collection());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
