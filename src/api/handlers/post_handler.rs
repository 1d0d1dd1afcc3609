//! Post and comment submission handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Comment, CommentStatus, Post, PostDraft};
use crate::errors::AppResult;
use crate::types::{PageQuery, Paginated};

/// Post representation returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    #[schema(example = "On comment moderation")]
    pub title: String,
    pub content: String,
    /// URL of the post illustration
    pub picture: String,
    pub published_at: DateTime<Utc>,
    pub author_id: i64,
    pub category_id: i64,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            picture: post.picture,
            published_at: post.published_at,
            author_id: post.author_id,
            category_id: post.category_id,
        }
    }
}

/// Comment representation returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    #[schema(example = "approved")]
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub post_id: i64,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            status: comment.status,
            created_at: comment.created_at,
            author_id: comment.author_id,
            post_id: comment.post_id,
        }
    }
}

/// A post together with its approved comments
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    /// Approved comments, newest first
    pub comments: Vec<CommentResponse>,
    /// Number of approved comments
    pub comments_count: u64,
}

/// Request body for creating or updating a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostRequest {
    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    #[schema(example = "On comment moderation")]
    pub title: String,
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,
    /// URL of the post illustration
    #[validate(url(message = "Picture must be a valid URL"))]
    #[schema(example = "https://example.com/picture.jpg")]
    pub picture: String,
    pub category_id: i64,
}

impl From<PostRequest> for PostDraft {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            picture: req.picture,
            category_id: req.category_id,
        }
    }
}

/// Request body for submitting a comment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "Comment must not be empty"))]
    #[schema(example = "Great article!")]
    pub content: String,
}

/// Create post routes.
///
/// Reads are public; the write handlers authenticate through the
/// `CurrentUser` extractor.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/latest", get(latest_posts))
        .route(
            "/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/:id/comments", axum::routing::post(add_comment))
}

/// List posts, newest first
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of posts; an out-of-range page is clamped to the last page")
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<PostResponse>>> {
    let page = state.post_service.list_posts(query.page).await?;
    Ok(Json(page.map(PostResponse::from)))
}

/// The three most recent posts
#[utoipa::path(
    get,
    path = "/posts/latest",
    tag = "Posts",
    responses(
        (status = 200, description = "Most recent posts")
    )
)]
pub async fn latest_posts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = state.post_service.latest_posts().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// A post with its approved comments
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post detail", body = PostDetailResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDetailResponse>> {
    let detail = state.post_service.get_post(id).await?;

    Ok(Json(PostDetailResponse {
        post: PostResponse::from(detail.post),
        comments: detail
            .comments
            .into_iter()
            .map(CommentResponse::from)
            .collect(),
        comments_count: detail.comments_count,
    }))
}

/// Create a post, attributed to the caller
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    request_body = PostRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<PostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let post = state
        .post_service
        .create_post(current_user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// Update a post (admin only)
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PostRequest>,
) -> AppResult<Json<PostResponse>> {
    require_admin(&current_user)?;

    let post = state.post_service.update_post(id, payload.into()).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Delete a post (admin only)
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;

    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Submit a comment on a post; it awaits moderation
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = CommentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Comment submitted, pending moderation", body = CommentResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let comment = state
        .moderation_service
        .submit(current_user.id, id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}
