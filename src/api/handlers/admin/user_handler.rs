//! Admin account management handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ActionTokenRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{is_valid_role, ACTION_TOGGLE_USER};
use crate::domain::{User, UserResponse, UserRole, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::types::{PageQuery, Paginated};

/// A user in the admin listing, with the token needed to toggle the account
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Token accepted by the toggle endpoint for this user
    pub toggle_token: String,
}

/// Request body for editing an account; absent fields stay untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 180, message = "Email must be at most 180 characters"))]
    pub email: Option<String>,
    #[validate(length(min = 2, max = 100, message = "First name must be 2-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 100, message = "Last name must be 2-100 characters"))]
    pub last_name: Option<String>,
    /// Role tags, e.g. `["ROLE_USER", "ROLE_ADMIN"]`
    pub roles: Option<Vec<String>>,
    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_picture: Option<String>,
}

impl UpdateUserRequest {
    /// Turn the request into a domain update, rejecting unknown role tags.
    fn into_update(self) -> AppResult<UserUpdate> {
        let roles = match self.roles {
            Some(tags) => {
                let mut roles = Vec::with_capacity(tags.len());
                for tag in &tags {
                    if !is_valid_role(tag) {
                        return Err(AppError::validation(format!("Unknown role: {}", tag)));
                    }
                    if let Some(role) = UserRole::parse(tag) {
                        roles.push(role);
                    }
                }
                Some(roles)
            }
            None => None,
        };

        Ok(UserUpdate {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            roles,
            profile_picture: self.profile_picture,
        })
    }
}

/// Create admin user routes
pub fn admin_user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id/toggle", post(toggle_user))
}

fn with_toggle_token(state: &AppState, user: User) -> AppResult<AdminUserResponse> {
    let toggle_token = state.action_tokens.issue(ACTION_TOGGLE_USER, user.id)?;

    Ok(AdminUserResponse {
        user: UserResponse::from(user),
        toggle_token,
    })
}

/// List user accounts, newest first
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Accounts",
    params(PageQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of users with their toggle tokens"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<AdminUserResponse>>> {
    require_admin(&current_user)?;

    let page = state.account_service.list_users(query.page).await?;

    let meta = page.meta;
    let data = page
        .data
        .into_iter()
        .map(|user| with_toggle_token(&state, user))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(Paginated { data, meta }))
}

/// A single user account
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User with toggle token", body = AdminUserResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AdminUserResponse>> {
    require_admin(&current_user)?;

    let user = state.account_service.get_user(id).await?;
    Ok(Json(with_toggle_token(&state, user)?))
}

/// Edit a user account
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .account_service
        .update_user(id, payload.into_update()?)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Toggle a user account between active and disabled
#[utoipa::path(
    post,
    path = "/admin/users/{id}/toggle",
    tag = "Accounts",
    params(("id" = i64, Path, description = "User id")),
    request_body = ActionTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account toggled", body = UserResponse),
        (status = 403, description = "Admin role required, invalid token, or own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn toggle_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ActionTokenRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .account_service
        .toggle_active(id, current_user.id, &payload.token)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
