//! Comment repository - moderation reads and writes.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::comment::{self, Entity as CommentEntity};
use crate::domain::{Comment, CommentStatus, StatusFilter};
use crate::errors::{AppError, AppResult};

/// Read and write access to comments.
///
/// `find_approved_for_post` and `count_approved_for_post` run the same
/// filter, so the count always equals the length of the unbounded listing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>>;

    /// Insert a new comment; status is always `pending`
    async fn create(&self, author_id: i64, post_id: i64, content: String) -> AppResult<Comment>;

    /// Overwrite the moderation status (idempotent at the store level)
    async fn set_status(&self, id: i64, status: CommentStatus) -> AppResult<Comment>;

    /// Hard delete, any status
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Admin listing page ordered by creation time descending, plus total
    async fn find_page(
        &self,
        filter: StatusFilter,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<Comment>, u64)>;

    /// Approved comments for a post, newest first
    async fn find_approved_for_post(&self, post_id: i64) -> AppResult<Vec<Comment>>;

    async fn count_approved_for_post(&self, post_id: i64) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`CommentRepository`]
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>> {
        let model = CommentEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Comment::from))
    }

    async fn create(&self, author_id: i64, post_id: i64, content: String) -> AppResult<Comment> {
        let active_model = comment::ActiveModel {
            id: NotSet,
            content: Set(content),
            status: Set(CommentStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            author_id: Set(author_id),
            post_id: Set(post_id),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Comment::from(model))
    }

    async fn set_status(&self, id: i64, status: CommentStatus) -> AppResult<Comment> {
        let model = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: comment::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());

        let model = active.update(&self.db).await?;
        Ok(Comment::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = CommentEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn find_page(
        &self,
        filter: StatusFilter,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<Comment>, u64)> {
        let mut query = CommentEntity::find().order_by_desc(comment::Column::CreatedAt);

        if let Some(status) = filter.status() {
            query = query.filter(comment::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Comment::from).collect(), total))
    }

    async fn find_approved_for_post(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        let models = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Status.eq(CommentStatus::Approved.as_str()))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Comment::from).collect())
    }

    async fn count_approved_for_post(&self, post_id: i64) -> AppResult<u64> {
        let total = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Status.eq(CommentStatus::Approved.as_str()))
            .count(&self.db)
            .await?;

        Ok(total)
    }
}
