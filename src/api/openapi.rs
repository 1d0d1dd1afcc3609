//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::admin::{comment_handler, user_handler, ActionTokenRequest};
use crate::api::handlers::{auth_handler, category_handler, post_handler};
use crate::domain::{CommentStatus, StatusFilter, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::PaginationMeta;

/// OpenAPI documentation for the Blog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "0.1.0",
        description = "A blog platform with comment moderation and account management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Public catalog
        post_handler::list_posts,
        post_handler::latest_posts,
        post_handler::get_post,
        category_handler::list_categories,
        // Authenticated post endpoints
        post_handler::create_post,
        post_handler::update_post,
        post_handler::delete_post,
        post_handler::add_comment,
        // Moderation
        comment_handler::list_comments,
        comment_handler::get_comment,
        comment_handler::approve_comment,
        comment_handler::reject_comment,
        comment_handler::delete_comment,
        // Account management
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::toggle_user,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            CommentStatus,
            StatusFilter,
            // Shared types
            PaginationMeta,
            ActionTokenRequest,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Post and comment types
            post_handler::PostRequest,
            post_handler::PostResponse,
            post_handler::PostDetailResponse,
            post_handler::CommentRequest,
            post_handler::CommentResponse,
            category_handler::CategoryResponse,
            // Admin types
            comment_handler::ModeratedCommentResponse,
            user_handler::AdminUserResponse,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Posts", description = "Public catalog and post management"),
        (name = "Categories", description = "Category reference data"),
        (name = "Moderation", description = "Comment moderation queue"),
        (name = "Accounts", description = "Admin account management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
