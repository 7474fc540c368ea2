use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Identifiers are 24-character hex ObjectIds. A malformed identifier is
/// reported as [`UserError::NotFound`] without touching the store, the same
/// as a well-formed one that matches nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the returned user carries the assigned id
    async fn create(&self, user: User) -> UserResult<User>;

    /// Every stored user; empty when there are none
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn find_one(&self, id: &str) -> UserResult<User>;

    /// Replace username, email and password hash of the user with `user.id`
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: &str) -> UserResult<()>;
}

/// Parse a path identifier into an ObjectId, mapping bad input to NotFound
pub(crate) fn parse_object_id(id: &str) -> UserResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| UserError::NotFound(id.to_string()))
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids are generated ObjectIds so they look exactly like the MongoDB ones;
/// `find_all` returns users in creation order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let oid = ObjectId::new();
        let user = user.with_id(oid.to_hex());

        self.users.write().await.insert(oid, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn find_one(&self, id: &str) -> UserResult<User> {
        let oid = parse_object_id(id)?;
        let users = self.users.read().await;

        users
            .get(&oid)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let oid = parse_object_id(&user.id)?;
        let mut users = self.users.write().await;

        let stored = users
            .get_mut(&oid)
            .ok_or_else(|| UserError::NotFound(user.id.clone()))?;
        stored.username = user.username;
        stored.password_hash = user.password_hash;
        stored.email = user.email;

        tracing::info!(user_id = %stored.id, "Updated user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> UserResult<()> {
        let oid = parse_object_id(id)?;

        if self.users.write().await.remove(&oid).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
