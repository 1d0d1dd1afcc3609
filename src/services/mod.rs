//! Service layer - business logic and orchestration.

pub mod account_service;
pub mod action_token;
pub mod auth_service;
pub mod container;
pub mod moderation_service;
pub mod post_service;

pub use account_service::{AccountManager, AccountService};
pub use action_token::{ActionTokenVerifier, ActionTokens};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::{ServiceContainer, Services};
pub use moderation_service::{ModerationService, Moderator};
pub use post_service::{PostDetail, PostManager, PostService};

#[cfg(any(test, feature = "test-utils"))]
pub use action_token::MockActionTokenVerifier;
