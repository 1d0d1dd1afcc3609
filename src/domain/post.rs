//! Post domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post domain entity.
///
/// Author and category are required references; both foreign keys are
/// NOT NULL at the schema level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// URL of the post illustration
    pub picture: String,
    pub published_at: DateTime<Utc>,
    pub author_id: i64,
    pub category_id: i64,
}

/// Fields needed to create or replace a post.
///
/// Length and URL constraints are checked at the API boundary; the service
/// re-checks that the category exists before persisting.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub picture: String,
    pub category_id: i64,
}
