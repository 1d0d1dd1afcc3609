//! Category repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::category::{self, Entity as CategoryEntity};
use crate::domain::Category;
use crate::errors::AppResult;

/// Access to the category reference data used by post forms.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>>;

    /// All categories ordered by name
    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Category>;
}

/// SeaORM-backed implementation of [`CategoryRepository`]
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let model = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Category::from))
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Category> {
        let active_model = category::ActiveModel {
            id: NotSet,
            name: Set(name),
            description: Set(description),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Category::from(model))
    }
}
