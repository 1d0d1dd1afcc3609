//! SeaORM entity for the `comments` table.

use sea_orm::entity::prelude::*;

use crate::domain::{Comment, CommentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Current moderation status as its lowercase wire string
    pub status: String,
    pub created_at: DateTimeUtc,
    pub author_id: i64,
    pub post_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Comment {
            id: model.id,
            content: model.content,
            // Legacy rows predating moderation carry NULL-ish or unknown
            // values; they are treated as still pending
            status: CommentStatus::parse(&model.status).unwrap_or_default(),
            created_at: model.created_at,
            author_id: model.author_id,
            post_id: model.post_id,
        }
    }
}
