//! Admin handlers - moderation and account management.
//!
//! Every state-changing endpoint here takes a per-action token in the
//! request body; the matching `GET` listings hand the tokens out.

pub mod comment_handler;
pub mod user_handler;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub use comment_handler::admin_comment_routes;
pub use user_handler::admin_user_routes;

/// Body carrying the per-action token for a sensitive mutation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActionTokenRequest {
    #[validate(length(min = 1, message = "Action token is required"))]
    pub token: String,
}
