//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::password::hash_password;
use crate::repository::UserRepository;

/// User service providing business logic operations
///
/// Hashes passwords and maps request DTOs onto [`User`]; everything else is
/// delegated to the repository unchanged.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<User> {
        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.username, password_hash, input.email);

        self.repository.create(user).await
    }

    /// List all users
    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_one_user(&self, id: &str) -> UserResult<User> {
        self.repository.find_one(id).await
    }

    /// Replace a user's username, email and password
    ///
    /// The password is always rehashed, including an empty one. The path id
    /// wins over any id in the body.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: &str, input: UpdateUserRequest) -> UserResult<User> {
        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.username, password_hash, input.email).with_id(id);

        self.repository.update(user).await
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::password::verify_password;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    const ID: &str = "65f1c0ffee0000000000abcd";

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|user| {
                user.id.is_empty()
                    && user.username == "al"
                    && user.email == "a@x.com"
                    && verify_password("secret", &user.password_hash).unwrap()
            })
            .times(1)
            .returning(|user| Ok(user.with_id(ID)));

        let service = UserService::new(mock_repo);
        let created = service
            .create_user(CreateUserRequest {
                username: "al".into(),
                password: "secret".into(),
                email: "a@x.com".into(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, ID);
        assert!(!verify_password("other", &created.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_user_uses_path_id() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .withf(|user| user.id == ID && user.username == "bo")
            .times(1)
            .returning(Ok);

        let service = UserService::new(mock_repo);
        let updated = service
            .update_user(
                ID,
                UpdateUserRequest {
                    id: Some("ffffffffffffffffffffffff".into()),
                    username: "bo".into(),
                    email: "b@x.com".into(),
                    password: "pw2".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, ID);
        assert!(verify_password("pw2", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_user_without_password_hashes_empty_string() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().returning(Ok);

        let service = UserService::new(mock_repo);
        let updated = service
            .update_user(
                ID,
                UpdateUserRequest {
                    id: None,
                    username: "al".into(),
                    email: "a@x.com".into(),
                    password: String::new(),
                },
            )
            .await
            .unwrap();

        assert!(verify_password("", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_get_one_user_propagates_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_one()
            .with(eq(ID))
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.get_one_user(ID).await,
            Err(UserError::NotFound(id)) if id == ID
        ));
    }

    #[tokio::test]
    async fn test_get_all_users_passes_through() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_all()
            .returning(|| Ok(vec![User::new("al", "h", "a@x.com").with_id(ID)]));

        let service = UserService::new(mock_repo);
        let users = service.get_all_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, ID);
    }

    #[tokio::test]
    async fn test_delete_user_propagates_persistence_error() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_delete()
            .with(eq(ID))
            .returning(|_| Err(UserError::Persistence("connection reset".into())));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.delete_user(ID).await,
            Err(UserError::Persistence(_))
        ));
    }
}
