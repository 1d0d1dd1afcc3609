//! Moderation service - the comment lifecycle.
//!
//! Comments enter as `pending`, administrators approve or reject them, and
//! only approved comments appear on the public post page. Approve and
//! reject are idempotent and may re-transition a previously moderated
//! comment; delete is a hard delete from any status.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{
    ACTION_APPROVE_COMMENT, ACTION_DELETE_COMMENT, ACTION_REJECT_COMMENT, ADMIN_PAGE_SIZE,
};
use crate::domain::{Comment, CommentStatus, StatusFilter};
use crate::errors::{AppResult, OptionExt};
use crate::infra::Store;
use crate::services::ActionTokenVerifier;
use crate::types::Paginated;

/// Moderation service trait for dependency injection.
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Submit a new comment on a post; it starts in `pending`
    async fn submit(&self, author_id: i64, post_id: i64, content: String) -> AppResult<Comment>;

    /// Get a single comment by id
    async fn get_comment(&self, id: i64) -> AppResult<Comment>;

    /// Admin listing, newest first, optionally filtered by status
    async fn list_comments(
        &self,
        filter: StatusFilter,
        page: u64,
    ) -> AppResult<Paginated<Comment>>;

    /// Approve a comment; requires a token issued for this action and id
    async fn approve(&self, id: i64, token: &str) -> AppResult<Comment>;

    /// Reject a comment; requires a token issued for this action and id
    async fn reject(&self, id: i64, token: &str) -> AppResult<Comment>;

    /// Hard delete a comment; requires a token issued for this action and id
    async fn delete_comment(&self, id: i64, token: &str) -> AppResult<()>;

    /// Approved comments for a post plus their count
    async fn approved_for_post(&self, post_id: i64) -> AppResult<(Vec<Comment>, u64)>;
}

/// Concrete implementation of ModerationService backed by the store.
pub struct Moderator<S: Store> {
    store: Arc<S>,
    tokens: Arc<dyn ActionTokenVerifier>,
}

impl<S: Store> Moderator<S> {
    pub fn new(store: Arc<S>, tokens: Arc<dyn ActionTokenVerifier>) -> Self {
        Self { store, tokens }
    }

    /// Shared transition body for approve and reject.
    ///
    /// Order matters: the comment is loaded first so a missing id reports
    /// `NotFound` rather than a token failure, then the token is checked
    /// before any write happens.
    async fn transition(
        &self,
        id: i64,
        token: &str,
        action: &str,
        status: CommentStatus,
    ) -> AppResult<Comment> {
        let comment = self
            .store
            .comments()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        self.tokens.verify(token, action, comment.id)?;

        tracing::info!(comment_id = comment.id, status = %status, "comment moderated");
        self.store.comments().set_status(comment.id, status).await
    }
}

#[async_trait]
impl<S: Store> ModerationService for Moderator<S> {
    async fn submit(&self, author_id: i64, post_id: i64, content: String) -> AppResult<Comment> {
        // The post must exist; dangling comments are never created
        self.store
            .posts()
            .find_by_id(post_id)
            .await?
            .ok_or_not_found()?;

        self.store
            .comments()
            .create(author_id, post_id, content)
            .await
    }

    async fn get_comment(&self, id: i64) -> AppResult<Comment> {
        self.store
            .comments()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list_comments(
        &self,
        filter: StatusFilter,
        page: u64,
    ) -> AppResult<Paginated<Comment>> {
        let page = page.max(1);
        let (comments, total) = self
            .store
            .comments()
            .find_page(filter, page, ADMIN_PAGE_SIZE)
            .await?;

        Ok(Paginated::new(comments, page, ADMIN_PAGE_SIZE, total))
    }

    async fn approve(&self, id: i64, token: &str) -> AppResult<Comment> {
        self.transition(id, token, ACTION_APPROVE_COMMENT, CommentStatus::Approved)
            .await
    }

    async fn reject(&self, id: i64, token: &str) -> AppResult<Comment> {
        self.transition(id, token, ACTION_REJECT_COMMENT, CommentStatus::Rejected)
            .await
    }

    async fn delete_comment(&self, id: i64, token: &str) -> AppResult<()> {
        let comment = self
            .store
            .comments()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        self.tokens.verify(token, ACTION_DELETE_COMMENT, comment.id)?;

        tracing::info!(comment_id = comment.id, "comment deleted");
        self.store.comments().delete(comment.id).await
    }

    async fn approved_for_post(&self, post_id: i64) -> AppResult<(Vec<Comment>, u64)> {
        let comments = self.store.comments().find_approved_for_post(post_id).await?;
        let count = self.store.comments().count_approved_for_post(post_id).await?;
        Ok((comments, count))
    }
}
