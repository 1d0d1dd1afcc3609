//! HTTP request handlers.

pub mod admin;
pub mod auth_handler;
pub mod category_handler;
pub mod post_handler;

pub use admin::{admin_comment_routes, admin_user_routes};
pub use auth_handler::auth_routes;
pub use category_handler::category_routes;
pub use post_handler::post_routes;
