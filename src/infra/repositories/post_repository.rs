//! Post repository - publication lookups and mutations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::post::{self, Entity as PostEntity};
use crate::domain::{Post, PostDraft};
use crate::errors::{AppError, AppResult};

/// Read and write access to posts.
///
/// All listings are ordered by publication time descending.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>>;

    async fn create(&self, author_id: i64, draft: PostDraft) -> AppResult<Post>;

    /// Replace title, content, picture and category of an existing post
    async fn update(&self, id: i64, draft: PostDraft) -> AppResult<Post>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;

    /// Page of posts plus total count
    async fn find_page(&self, page: u64, per_page: u64) -> AppResult<(Vec<Post>, u64)>;

    /// The `n` most recently published posts
    async fn find_latest(&self, n: u64) -> AppResult<Vec<Post>>;
}

/// SeaORM-backed implementation of [`PostRepository`]
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build the insert model for a new post; publication time is assigned here.
fn draft_model(author_id: i64, draft: PostDraft) -> post::ActiveModel {
    post::ActiveModel {
        id: NotSet,
        title: Set(draft.title),
        content: Set(draft.content),
        picture: Set(draft.picture),
        published_at: Set(Utc::now()),
        author_id: Set(author_id),
        category_id: Set(draft.category_id),
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>> {
        let model = PostEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Post::from))
    }

    async fn create(&self, author_id: i64, draft: PostDraft) -> AppResult<Post> {
        let model = draft_model(author_id, draft).insert(&self.db).await?;
        Ok(Post::from(model))
    }

    async fn update(&self, id: i64, draft: PostDraft) -> AppResult<Post> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: post::ActiveModel = model.into();
        active.title = Set(draft.title);
        active.content = Set(draft.content);
        active.picture = Set(draft.picture);
        active.category_id = Set(draft.category_id);

        let model = active.update(&self.db).await?;
        Ok(Post::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PostEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let total = PostEntity::find().count(&self.db).await?;
        Ok(total)
    }

    async fn find_page(&self, page: u64, per_page: u64) -> AppResult<(Vec<Post>, u64)> {
        let paginator = PostEntity::find()
            .order_by_desc(post::Column::PublishedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Post::from).collect(), total))
    }

    async fn find_latest(&self, n: u64) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::PublishedAt)
            .limit(n)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Post::from).collect())
    }
}
