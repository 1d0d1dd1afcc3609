//! Admin comment moderation handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::ActionTokenRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::handlers::post_handler::CommentResponse;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{
    ACTION_APPROVE_COMMENT, ACTION_DELETE_COMMENT, ACTION_REJECT_COMMENT, DEFAULT_PAGE_NUMBER,
};
use crate::domain::{Comment, StatusFilter};
use crate::errors::AppResult;
use crate::types::Paginated;

/// Query parameters for the admin comment listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct CommentListQuery {
    /// Requested page, 1-indexed
    #[serde(default = "default_page")]
    pub page: u64,
    /// Restrict the listing to one moderation status
    #[serde(default)]
    pub status: StatusFilter,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

/// A comment in the moderation queue, with the tokens needed to act on it
#[derive(Debug, Serialize, ToSchema)]
pub struct ModeratedCommentResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    /// Token accepted by the approve endpoint for this comment
    pub approve_token: String,
    /// Token accepted by the reject endpoint for this comment
    pub reject_token: String,
    /// Token accepted by the delete endpoint for this comment
    pub delete_token: String,
}

/// Create admin comment routes
pub fn admin_comment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments))
        .route("/:id", get(get_comment))
        .route("/:id/approve", post(approve_comment))
        .route("/:id/reject", post(reject_comment))
        .route("/:id", delete(delete_comment))
}

fn with_tokens(state: &AppState, comment: Comment) -> AppResult<ModeratedCommentResponse> {
    let approve_token = state.action_tokens.issue(ACTION_APPROVE_COMMENT, comment.id)?;
    let reject_token = state.action_tokens.issue(ACTION_REJECT_COMMENT, comment.id)?;
    let delete_token = state.action_tokens.issue(ACTION_DELETE_COMMENT, comment.id)?;

    Ok(ModeratedCommentResponse {
        comment: CommentResponse::from(comment),
        approve_token,
        reject_token,
        delete_token,
    })
}

/// List comments for moderation, newest first
#[utoipa::path(
    get,
    path = "/admin/comments",
    tag = "Moderation",
    params(CommentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of comments with their action tokens"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<CommentListQuery>,
) -> AppResult<Json<Paginated<ModeratedCommentResponse>>> {
    require_admin(&current_user)?;

    let page = state
        .moderation_service
        .list_comments(query.status, query.page)
        .await?;

    let meta = page.meta;
    let data = page
        .data
        .into_iter()
        .map(|comment| with_tokens(&state, comment))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(Paginated { data, meta }))
}

/// A single comment with its action tokens
#[utoipa::path(
    get,
    path = "/admin/comments/{id}",
    tag = "Moderation",
    params(("id" = i64, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment with action tokens", body = ModeratedCommentResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ModeratedCommentResponse>> {
    require_admin(&current_user)?;

    let comment = state.moderation_service.get_comment(id).await?;
    Ok(Json(with_tokens(&state, comment)?))
}

/// Approve a comment
#[utoipa::path(
    post,
    path = "/admin/comments/{id}/approve",
    tag = "Moderation",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = ActionTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment approved", body = CommentResponse),
        (status = 403, description = "Admin role required or invalid action token"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn approve_comment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ActionTokenRequest>,
) -> AppResult<Json<CommentResponse>> {
    require_admin(&current_user)?;

    let comment = state.moderation_service.approve(id, &payload.token).await?;
    Ok(Json(CommentResponse::from(comment)))
}

/// Reject a comment
#[utoipa::path(
    post,
    path = "/admin/comments/{id}/reject",
    tag = "Moderation",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = ActionTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment rejected", body = CommentResponse),
        (status = 403, description = "Admin role required or invalid action token"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn reject_comment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ActionTokenRequest>,
) -> AppResult<Json<CommentResponse>> {
    require_admin(&current_user)?;

    let comment = state.moderation_service.reject(id, &payload.token).await?;
    Ok(Json(CommentResponse::from(comment)))
}

/// Permanently delete a comment
#[utoipa::path(
    delete,
    path = "/admin/comments/{id}",
    tag = "Moderation",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = ActionTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Admin role required or invalid action token"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ActionTokenRequest>,
) -> AppResult<axum::http::StatusCode> {
    require_admin(&current_user)?;

    state
        .moderation_service
        .delete_comment(id, &payload.token)
        .await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}
