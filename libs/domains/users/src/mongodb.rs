//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, to_document},
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDocument};
use crate::repository::{UserRepository, parse_object_id};

/// Collection used by [`MongoUserRepository::new`]
pub const DEFAULT_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository on the `users` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("user-service"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<UserDocument>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<UserDocument> {
        &self.collection
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: User) -> UserResult<User> {
        let result = self.collection.insert_one(UserDocument::from(&user)).await?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::Persistence(format!(
                "unexpected inserted id type: {}",
                result.inserted_id
            ))
        })?;

        let user = user.with_id(oid.to_hex());
        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, id: &str) -> UserResult<User> {
        let oid = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(User::from)
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let oid = parse_object_id(&user.id)?;
        // `_id` is never part of the document, so it is never overwritten
        let fields = to_document(&UserDocument::from(&user))?;

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(user.id));
        }

        tracing::info!(user_id = %user.id, "User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<()> {
        let oid = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %id, "User deleted successfully");
        Ok(())
    }
}
