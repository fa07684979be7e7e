//! User service - account lifecycle on top of the user repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{Action, Password, User, UserForm, UserPatch, MAX_PAGE_SIZE};

use crate::repository::{NewUser, UserChanges, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Prepare, validate, hash and insert a new account
    async fn create_user(&self, form: UserForm) -> AppResult<User>;

    /// List up to `MAX_PAGE_SIZE` accounts
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get account by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Apply a partial update; the password is re-hashed only if one is supplied
    async fn update_user(&self, id: i32, patch: UserPatch) -> AppResult<User>;

    /// Replace the password of an account
    async fn change_password(&self, id: i32, new_password: String) -> AppResult<User>;

    /// Delete account by ID, returning the number of rows removed
    async fn delete_user(&self, id: i32) -> AppResult<u64>;

    /// Check an email/password pair and return the matching account
    async fn authenticate(&self, form: UserForm) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, mut form: UserForm) -> AppResult<User> {
        form.prepare();
        form.validate(Action::Create)?;
        form.hash_password()?;

        let user = self
            .repo
            .create(NewUser {
                nickname: form.nickname,
                email: form.email,
                password_hash: form.password,
                created_at: form.created_at,
                updated_at: form.updated_at,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list(MAX_PAGE_SIZE).await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        debug!(user_id = id, "Looking up user");
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_user(&self, id: i32, mut patch: UserPatch) -> AppResult<User> {
        patch.prepare();
        patch.validate()?;

        let password_hash = patch
            .password
            .as_deref()
            .map(Password::new)
            .transpose()?
            .map(Password::into_string);

        let changes = UserChanges {
            nickname: patch.nickname,
            email: patch.email,
            password_hash,
        };
        let rehashed = changes.password_hash.is_some();

        let user = self.repo.update(id, changes).await?.ok_or_not_found()?;
        info!(user_id = id, password_changed = rehashed, "User updated");
        Ok(user)
    }

    async fn change_password(&self, id: i32, new_password: String) -> AppResult<User> {
        self.update_user(id, UserPatch::default().password(new_password))
            .await
    }

    async fn delete_user(&self, id: i32) -> AppResult<u64> {
        let removed = self.repo.delete(id).await?;
        info!(user_id = id, removed, "User deleted");
        Ok(removed)
    }

    async fn authenticate(&self, mut form: UserForm) -> AppResult<User> {
        form.prepare();
        form.validate(Action::Login)?;

        let user = self
            .repo
            .find_by_email(&form.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        user.verify_password(&form.password)?;

        Ok(user)
    }
}
