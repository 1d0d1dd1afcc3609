//! Post service - the public catalog and author-side post management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{LATEST_POSTS_LIMIT, POSTS_PAGE_SIZE};
use crate::domain::{Category, Comment, Post, PostDraft};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;
use crate::types::{clamp_page, Paginated};

/// A post together with its approved comments, as shown on the public
/// post page.
#[derive(Debug)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub comments_count: u64,
}

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post; the category must exist
    async fn create_post(&self, author_id: i64, draft: PostDraft) -> AppResult<Post>;

    /// Replace an existing post's content; the category must exist
    async fn update_post(&self, id: i64, draft: PostDraft) -> AppResult<Post>;

    async fn delete_post(&self, id: i64) -> AppResult<()>;

    /// A post with its approved comments and their count
    async fn get_post(&self, id: i64) -> AppResult<PostDetail>;

    /// Public listing, newest first.
    ///
    /// A page beyond the end is clamped to the last page with data; the
    /// page actually served is reported in the response metadata.
    async fn list_posts(&self, page: u64) -> AppResult<Paginated<Post>>;

    /// The three most recent posts for the sidebar widget
    async fn latest_posts(&self) -> AppResult<Vec<Post>>;

    /// All categories, for the post form and the public navigation
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
}

/// Concrete implementation of PostService backed by the store.
pub struct PostManager<S: Store> {
    store: Arc<S>,
}

impl<S: Store> PostManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn ensure_category_exists(&self, category_id: i64) -> AppResult<()> {
        if self
            .store
            .categories()
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation("Category does not exist"));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: Store> PostService for PostManager<S> {
    async fn create_post(&self, author_id: i64, draft: PostDraft) -> AppResult<Post> {
        self.ensure_category_exists(draft.category_id).await?;
        self.store.posts().create(author_id, draft).await
    }

    async fn update_post(&self, id: i64, draft: PostDraft) -> AppResult<Post> {
        self.ensure_category_exists(draft.category_id).await?;
        self.store.posts().update(id, draft).await
    }

    async fn delete_post(&self, id: i64) -> AppResult<()> {
        self.store.posts().delete(id).await
    }

    async fn get_post(&self, id: i64) -> AppResult<PostDetail> {
        let post = self.store.posts().find_by_id(id).await?.ok_or_not_found()?;

        let comments = self
            .store
            .comments()
            .find_approved_for_post(post.id)
            .await?;
        let comments_count = self
            .store
            .comments()
            .count_approved_for_post(post.id)
            .await?;

        Ok(PostDetail {
            post,
            comments,
            comments_count,
        })
    }

    async fn list_posts(&self, page: u64) -> AppResult<Paginated<Post>> {
        // Counting first lets the page be clamped before fetching, so an
        // out-of-range request still returns the last page of real data
        let total = self.store.posts().count().await?;
        let page = clamp_page(page, total, POSTS_PAGE_SIZE);

        let (posts, total) = self.store.posts().find_page(page, POSTS_PAGE_SIZE).await?;
        Ok(Paginated::new(posts, page, POSTS_PAGE_SIZE, total))
    }

    async fn latest_posts(&self) -> AppResult<Vec<Post>> {
        self.store.posts().find_latest(LATEST_POSTS_LIMIT).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.store.categories().list().await
    }
}
