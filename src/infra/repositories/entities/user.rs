//! SeaORM entity for the `users` table.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Role tags stored as a JSON array of strings
    pub roles: Json,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        // Unknown tags in legacy rows degrade to the base role
        let roles: Vec<UserRole> =
            serde_json::from_value(model.roles).unwrap_or_else(|_| vec![UserRole::User]);

        User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            roles,
            first_name: model.first_name,
            last_name: model.last_name,
            profile_picture: model.profile_picture,
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_active: model.is_active,
        }
    }
}

/// Serialize role tags for storage
pub fn roles_to_json(roles: &[UserRole]) -> Json {
    serde_json::json!(roles)
}
