use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity
///
/// `id` is empty until the store assigns one. The password hash is accepted
/// on deserialization but never serialized, so it cannot leak through any
/// response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier (24 hex characters)
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    #[schema(example = "al")]
    pub username: String,
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub password_hash: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Stored form of a user: `{_id, username, password, email}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    /// Password hash
    pub password: String,
    pub email: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            username: doc.username,
            password_hash: doc.password,
            email: doc.email,
        }
    }
}

impl From<&User> for UserDocument {
    /// The `_id` is left unset; the store assigns it on insert and updates
    /// address the record by filter instead.
    fn from(user: &User) -> Self {
        Self {
            id: None,
            username: user.username.clone(),
            password: user.password_hash.clone(),
            email: user.email.clone(),
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "al")]
    pub username: String,
    /// Plaintext password, hashed before it is stored
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "pw1")]
    pub password: String,
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// DTO for replacing a user
///
/// All mutable fields are replaced. An omitted `password` is treated as the
/// empty string and hashed like any other value. The body `id`, if any, is
/// ignored in favour of the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "al")]
    pub username: String,
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "al@x.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "pw2")]
    pub password: String,
}
