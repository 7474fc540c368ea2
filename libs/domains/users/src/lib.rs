//! Users Domain
//!
//! CRUD over user records stored in MongoDB, with Argon2id password hashing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON decoding, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Password hashing, DTO → entity mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, stored documents, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, MongoUserRepository, UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("user-service");
//!
//! let repository = MongoUserRepository::new(db);
//! let service = UserService::new(repository);
//!
//! // Serves /users and /users/{id}
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use crate::mongodb::MongoUserRepository;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUserRequest, UpdateUserRequest, User, UserDocument};
pub use password::{hash_password, verify_password};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
