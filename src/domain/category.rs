//! Category domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category referenced by posts; every post belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    #[schema(example = "Web development")]
    pub name: String,
    pub description: Option<String>,
}
