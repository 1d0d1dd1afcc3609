//! Comment entity and the moderation state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Moderation status of a comment.
///
/// Every comment starts `Pending`. `Approved` and `Rejected` are terminal
/// from the author's point of view, but an administrator may re-transition
/// freely (e.g. approve a previously rejected comment); only the current
/// status is stored, not the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CommentStatus::Pending),
            "approved" => Some(CommentStatus::Approved),
            "rejected" => Some(CommentStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter accepted by the admin comment listing.
///
/// `All` disables filtering; the other values match exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    #[default]
    All,
}

impl StatusFilter {
    /// The status this filter selects, if any
    pub fn status(&self) -> Option<CommentStatus> {
        match self {
            StatusFilter::Pending => Some(CommentStatus::Pending),
            StatusFilter::Approved => Some(CommentStatus::Approved),
            StatusFilter::Rejected => Some(CommentStatus::Rejected),
            StatusFilter::All => None,
        }
    }
}

/// Comment domain entity.
///
/// Owned by its author and attached to exactly one post; both sides are
/// stored as plain ids, lookups go through the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub post_id: i64,
}
