//! User directory service.
//!
//! Self-service profile operations plus the admin-only directory. The
//! directory endpoints check the caller's role before touching the
//! database, so non-admins learn nothing about which ids exist.

use crate::error::{AppError, AppResult};
use crate::models::{UpdateUser, User};
use crate::policy::{self, Action};
use crate::repositories::UserRepo;

/// Business rules around accounts. Cloning shares the repository's
/// pool handle.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepo,
}

impl UserService {
    pub fn new(repo: UserRepo) -> Self {
        Self { repo }
    }

    /// Fetches a user or reports `NotFound` under the client-facing
    /// entity name.
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", id))
    }

    /// Resolves the live account behind a token subject.
    ///
    /// Returns `None` when the account no longer exists or has been
    /// deleted since the token was issued.
    pub async fn find_active_user(&self, id: i64) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Updates the caller's own profile.
    ///
    /// An empty changeset skips the UPDATE and returns the stored row
    /// unchanged, still with a success result.
    pub async fn update_me(&self, caller: &User, update_data: UpdateUser) -> AppResult<User> {
        if update_data.is_empty() {
            return self.get_user(caller.id).await;
        }
        self.repo.update(caller.id, update_data).await
    }

    /// Lists all users. Admin only.
    pub async fn list_users(&self, caller: &User) -> AppResult<Vec<User>> {
        policy::authorize(caller, Action::ListUsers)?;
        self.repo.list().await
    }

    /// Shows a single user. Admin only; the role check precedes the lookup.
    pub async fn show_user(&self, caller: &User, id: i64) -> AppResult<User> {
        policy::authorize(caller, Action::ShowUser)?;
        self.get_user(id).await
    }

    /// Soft-deletes a user. Admin only; the role check precedes the lookup.
    pub async fn delete_user(&self, caller: &User, id: i64) -> AppResult<()> {
        policy::authorize(caller, Action::DeleteUser)?;
        let affected = self.repo.soft_delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("User", "id", id));
        }
        Ok(())
    }
}
