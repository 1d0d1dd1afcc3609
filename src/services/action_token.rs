//! Per-action tokens for sensitive admin mutations.
//!
//! Every state-changing moderation or account action carries a short-lived
//! token bound to the action name and the target entity id. A token issued
//! for `approve_comment` on comment 7 is useless for rejecting comment 7 or
//! approving comment 8. Verification happens after the target is loaded and
//! before anything is mutated, so a bad token always leaves state unchanged.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{Config, ACTION_TOKEN_TTL_SECONDS};
use crate::errors::{AppError, AppResult};

/// Claims carried by a per-action token
#[derive(Debug, Serialize, Deserialize)]
struct ActionClaims {
    /// Action name the token was issued for
    act: String,
    /// Entity id the token was issued for
    eid: i64,
    exp: i64,
    iat: i64,
}

/// Issues and verifies per-action tokens.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ActionTokenVerifier: Send + Sync {
    /// Issue a token bound to an action name and an entity id
    fn issue(&self, action: &str, entity_id: i64) -> AppResult<String>;

    /// Check that a token was issued for exactly this action and entity.
    ///
    /// Any mismatch, malformed token or expired token yields
    /// `InvalidActionToken`.
    fn verify(&self, token: &str, action: &str, entity_id: i64) -> AppResult<()>;
}

/// JWT-backed implementation of [`ActionTokenVerifier`]
pub struct ActionTokens {
    config: Config,
}

impl ActionTokens {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ActionTokenVerifier for ActionTokens {
    fn issue(&self, action: &str, entity_id: i64) -> AppResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = ActionClaims {
            act: action.to_string(),
            eid: entity_id,
            exp: now + ACTION_TOKEN_TTL_SECONDS,
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(token)
    }

    fn verify(&self, token: &str, action: &str, entity_id: i64) -> AppResult<()> {
        let data = decode::<ActionClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidActionToken)?;

        if data.claims.act != action || data.claims.eid != entity_id {
            return Err(AppError::InvalidActionToken);
        }

        Ok(())
    }
}
