//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AccountService, ActionTokenVerifier, AuthService, ModerationService, PostService,
    ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Post and category service
    pub post_service: Arc<dyn PostService>,
    /// Comment moderation service
    pub moderation_service: Arc<dyn ModerationService>,
    /// Admin account service
    pub account_service: Arc<dyn AccountService>,
    /// Per-action token issuer, used by the admin listings
    pub action_tokens: Arc<dyn ActionTokenVerifier>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            post_service: container.posts(),
            moderation_service: container.moderation(),
            account_service: container.accounts(),
            action_tokens: container.action_tokens(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Used by tests to wire in mock services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        post_service: Arc<dyn PostService>,
        moderation_service: Arc<dyn ModerationService>,
        account_service: Arc<dyn AccountService>,
        action_tokens: Arc<dyn ActionTokenVerifier>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            moderation_service,
            account_service,
            action_tokens,
            database,
        }
    }
}
