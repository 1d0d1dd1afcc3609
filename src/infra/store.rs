//! Store - request-scoped persistence context.
//!
//! The store is the single shared mutable resource in the system. Every
//! inbound action executes as one atomic unit against it; consistency is
//! delegated to the database's transactional guarantees, the services hold
//! no cross-request state and take no locks of their own.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CategoryRepository, CategoryStore, CommentRepository, CommentStore, PostRepository, PostStore,
    UserRepository, UserStore,
};

/// Centralized access to all repositories.
///
/// Services depend on this trait rather than on concrete stores, so tests
/// can swap in mock repositories per aggregate.
pub trait Store: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get post repository
    fn posts(&self) -> Arc<dyn PostRepository>;

    /// Get category repository
    fn categories(&self) -> Arc<dyn CategoryRepository>;

    /// Get comment repository
    fn comments(&self) -> Arc<dyn CommentRepository>;
}

/// Concrete store over a live database connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    post_repo: Arc<PostStore>,
    category_repo: Arc<CategoryStore>,
    comment_repo: Arc<CommentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            post_repo: Arc::new(PostStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            comment_repo: Arc::new(CommentStore::new(db)),
        }
    }
}

impl Store for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comment_repo.clone()
    }
}
