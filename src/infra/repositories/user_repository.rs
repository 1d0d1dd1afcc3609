//! User repository - account lookups and mutations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user::{self, roles_to_json, Entity as UserEntity};
use crate::domain::{User, UserRole, UserUpdate};
use crate::errors::{AppError, AppResult};

/// Read and write access to user accounts.
///
/// The unique email index in the database is the backstop for the
/// check-then-insert registration race: a duplicate insert surfaces as a
/// recoverable `Conflict`, never a crash.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create an account with the base role and `is_active = true`
    async fn create(
        &self,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<User>;

    /// Apply an admin edit; `None` fields stay untouched
    async fn update(&self, id: i64, changes: UserUpdate) -> AppResult<User>;

    /// Persist a new active/disabled flag
    async fn set_active(&self, id: i64, active: bool) -> AppResult<User>;

    /// Page of users ordered by creation time descending, plus total count
    async fn list_page(&self, page: u64, per_page: u64) -> AppResult<(Vec<User>, u64)>;
}

/// SeaORM-backed implementation of [`UserRepository`]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_insert_err(e: sea_orm::DbErr) -> AppError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Email"),
            _ => AppError::from(e),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<User> {
        let active_model = user::ActiveModel {
            id: NotSet,
            email: Set(email),
            password_hash: Set(password_hash),
            roles: Set(roles_to_json(&[UserRole::User])),
            first_name: Set(first_name),
            last_name: Set(last_name),
            profile_picture: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            is_active: Set(true),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(Self::map_insert_err)?;

        Ok(User::from(model))
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();

        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(roles) = changes.roles {
            active.roles = Set(roles_to_json(&roles));
        }
        if let Some(picture) = changes.profile_picture {
            active.profile_picture = Set(Some(picture));
        }
        active.updated_at = Set(Some(Utc::now()));

        let model = active
            .update(&self.db)
            .await
            .map_err(Self::map_insert_err)?;

        Ok(User::from(model))
    }

    async fn set_active(&self, id: i64, active: bool) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: user::ActiveModel = model.into();
        active_model.is_active = Set(active);
        active_model.updated_at = Set(Some(Utc::now()));

        let model = active_model.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn list_page(&self, page: u64, per_page: u64) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
