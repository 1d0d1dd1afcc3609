//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// Role tags carried by a user account.
///
/// Capability checks are tag-based (`User::has_role`) rather than
/// subtype-based: a user holds a set of tags and an operation asks for the
/// tag it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a role tag; unknown tags are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_USER => Some(UserRole::User),
            ROLE_ADMIN => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity.
///
/// `is_active` defaults to true on creation; when an administrator flips it
/// to false the account can no longer authenticate (see the login gate in
/// the auth service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<UserRole>,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl User {
    /// Check whether the user carries a role tag
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }
}

/// Fields an administrator may change on an existing account.
///
/// `None` leaves a field untouched; validation happens at the API boundary.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Option<Vec<UserRole>>,
    pub profile_picture: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Role tags
    #[schema(example = json!(["ROLE_USER"]))]
    pub roles: Vec<UserRole>,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles: user.roles,
            profile_picture: user.profile_picture,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
