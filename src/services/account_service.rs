//! Account service - admin-side user management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ACTION_TOGGLE_USER, ADMIN_PAGE_SIZE};
use crate::domain::{User, UserUpdate};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;
use crate::services::ActionTokenVerifier;
use crate::types::Paginated;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Get a single user by id
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// Admin listing, newest first
    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>>;

    /// Apply an admin edit to an account
    async fn update_user(&self, id: i64, changes: UserUpdate) -> AppResult<User>;

    /// Flip an account between active and disabled.
    ///
    /// Requires a token issued for this action and id. An administrator can
    /// never deactivate their own account.
    async fn toggle_active(&self, id: i64, acting_admin_id: i64, token: &str) -> AppResult<User>;
}

/// Concrete implementation of AccountService backed by the store.
pub struct AccountManager<S: Store> {
    store: Arc<S>,
    tokens: Arc<dyn ActionTokenVerifier>,
}

impl<S: Store> AccountManager<S> {
    pub fn new(store: Arc<S>, tokens: Arc<dyn ActionTokenVerifier>) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl<S: Store> AccountService for AccountManager<S> {
    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.store.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>> {
        let page = page.max(1);
        let (users, total) = self
            .store
            .users()
            .list_page(page, ADMIN_PAGE_SIZE)
            .await?;

        Ok(Paginated::new(users, page, ADMIN_PAGE_SIZE, total))
    }

    async fn update_user(&self, id: i64, changes: UserUpdate) -> AppResult<User> {
        // A changed email must not collide with another account. The unique
        // index backstops the race here as well.
        if let Some(email) = &changes.email {
            if let Some(existing) = self.store.users().find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        self.store.users().update(id, changes).await
    }

    async fn toggle_active(&self, id: i64, acting_admin_id: i64, token: &str) -> AppResult<User> {
        let user = self.store.users().find_by_id(id).await?.ok_or_not_found()?;

        // The self-check runs at the point of mutation, not just in the UI,
        // so the last admin cannot lock everyone out
        if user.id == acting_admin_id {
            return Err(AppError::SelfDeactivation);
        }

        self.tokens.verify(token, ACTION_TOGGLE_USER, user.id)?;

        let flipped = !user.is_active;
        tracing::info!(user_id = user.id, active = flipped, "account toggled");
        self.store.users().set_active(user.id, flipped).await
    }
}
