//! Service Container - centralized service access.

use std::sync::Arc;

use super::{AccountService, ActionTokenVerifier, AuthService, ModerationService, PostService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get post service
    fn posts(&self) -> Arc<dyn PostService>;

    /// Get moderation service
    fn moderation(&self) -> Arc<dyn ModerationService>;

    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get the per-action token issuer/verifier
    fn action_tokens(&self) -> Arc<dyn ActionTokenVerifier>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    post_service: Arc<dyn PostService>,
    moderation_service: Arc<dyn ModerationService>,
    account_service: Arc<dyn AccountService>,
    action_tokens: Arc<dyn ActionTokenVerifier>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{AccountManager, ActionTokens, Authenticator, Moderator, PostManager};

        let store = Arc::new(Persistence::new(db));
        let action_tokens: Arc<dyn ActionTokenVerifier> =
            Arc::new(ActionTokens::new(config.clone()));

        let auth_service = Arc::new(Authenticator::new(store.clone(), config));
        let post_service = Arc::new(PostManager::new(store.clone()));
        let moderation_service = Arc::new(Moderator::new(store.clone(), action_tokens.clone()));
        let account_service = Arc::new(AccountManager::new(store, action_tokens.clone()));

        Self {
            auth_service,
            post_service,
            moderation_service,
            account_service,
            action_tokens,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }

    fn moderation(&self) -> Arc<dyn ModerationService> {
        self.moderation_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn action_tokens(&self) -> Arc<dyn ActionTokenVerifier> {
        self.action_tokens.clone()
    }
}
