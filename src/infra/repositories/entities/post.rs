//! SeaORM entity for the `posts` table.

use sea_orm::entity::prelude::*;

use crate::domain::Post;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub picture: String,
    pub published_at: DateTimeUtc,
    pub author_id: i64,
    pub category_id: i64,
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
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Post {
            id: model.id,
            title: model.title,
            content: model.content,
            picture: model.picture,
            published_at: model.published_at,
            author_id: model.author_id,
            category_id: model.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn stored_post_maps_to_domain_field_for_field() {
        let now = Utc::now();
        let model = Model {
            id: 7,
            title: "A title".to_string(),
            content: "Body text long enough".to_string(),
            picture: "https://example.com/p.jpg".to_string(),
            published_at: now,
            author_id: 3,
            category_id: 2,
        };

        let post = Post::from(model);

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "A title");
        assert_eq!(post.content, "Body text long enough");
        assert_eq!(post.picture, "https://example.com/p.jpg");
        assert_eq!(post.published_at, now);
        assert_eq!(post.author_id, 3);
        assert_eq!(post.category_id, 2);
    }
}
