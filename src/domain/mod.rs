//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod category;
pub mod comment;
pub mod password;
pub mod post;
pub mod user;

pub use category::Category;
pub use comment::{Comment, CommentStatus, StatusFilter};
pub use password::Password;
pub use post::{Post, PostDraft};
pub use user::{User, UserResponse, UserRole, UserUpdate};
