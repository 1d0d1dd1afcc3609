//! Database migrations.

use sea_orm_migration::prelude::*;

mod m20260118_000001_create_users_and_posts;
mod m20260204_000001_add_categories_and_comments;
mod m20260204_000002_add_user_is_active;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260118_000001_create_users_and_posts::Migration),
            Box::new(m20260204_000001_add_categories_and_comments::Migration),
            Box::new(m20260204_000002_add_user_is_active::Migration),
        ]
    }
}
