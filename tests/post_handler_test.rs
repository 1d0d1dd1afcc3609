//! Post handler authorization tests.
//!
//! Any authenticated user may author a post; editing and deleting stay
//! reserved to administrators.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use mockall::predicate::eq;
use sea_orm::DatabaseConnection;

use blog_api::api::extractors::ValidatedJson;
use blog_api::api::handlers::post_handler::{create_post, delete_post, update_post, PostRequest};
use blog_api::api::middleware::CurrentUser;
use blog_api::api::AppState;
use blog_api::config::Config;
use blog_api::domain::{Category, Post};
use blog_api::errors::AppError;
use blog_api::infra::repositories::{
    CategoryRepository, CommentRepository, MockCategoryRepository, MockCommentRepository,
    MockPostRepository, MockUserRepository, PostRepository, UserRepository,
};
use blog_api::infra::{Database, Store};
use blog_api::services::{
    AccountManager, ActionTokenVerifier, ActionTokens, Authenticator, Moderator, PostManager,
};

#[derive(Default)]
struct TestStore {
    users: Arc<MockUserRepository>,
    posts: Arc<MockPostRepository>,
    categories: Arc<MockCategoryRepository>,
    comments: Arc<MockCommentRepository>,
}

impl Store for TestStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.posts.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comments.clone()
    }
}

fn test_state(store: TestStore) -> AppState {
    let store = Arc::new(store);
    let config = Config::with_secret(
        "postgres://localhost/test",
        "test-secret-that-is-long-enough-123456",
    );
    let action_tokens: Arc<dyn ActionTokenVerifier> = Arc::new(ActionTokens::new(config.clone()));
    let database = Arc::new(Database::from_connection(DatabaseConnection::default()));

    AppState::new(
        Arc::new(Authenticator::new(store.clone(), config)),
        Arc::new(PostManager::new(store.clone())),
        Arc::new(Moderator::new(store.clone(), action_tokens.clone())),
        Arc::new(AccountManager::new(store, action_tokens.clone())),
        action_tokens,
        database,
    )
}

fn regular_user(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        email: "reader@example.com".to_string(),
        roles: vec!["ROLE_USER".to_string()],
    }
}

fn admin_user(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        email: "admin@example.com".to_string(),
        roles: vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
    }
}

fn sample_request() -> PostRequest {
    PostRequest {
        title: "A post".to_string(),
        content: "Some content long enough".to_string(),
        picture: "https://example.com/p.jpg".to_string(),
        category_id: 3,
    }
}

#[tokio::test]
async fn test_regular_user_can_create_post() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_id().with(eq(3)).returning(|id| {
        Ok(Some(Category {
            id,
            name: "Rust".to_string(),
            description: None,
        }))
    });

    let mut posts = MockPostRepository::new();
    posts
        .expect_create()
        .times(1)
        .returning(|author_id, draft| {
            Ok(Post {
                id: 1,
                title: draft.title,
                content: draft.content,
                picture: draft.picture,
                published_at: Utc::now(),
                author_id,
                category_id: draft.category_id,
            })
        });

    let state = test_state(TestStore {
        posts: Arc::new(posts),
        categories: Arc::new(categories),
        ..Default::default()
    });

    let (status, body) = create_post(
        State(state),
        regular_user(17),
        ValidatedJson(sample_request()),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    // The post is attributed to the caller
    assert_eq!(body.0.author_id, 17);
}

#[tokio::test]
async fn test_update_post_still_requires_admin() {
    // No repository expectations: nothing may be read or written
    let state = test_state(TestStore::default());

    let err = update_post(
        State(state),
        regular_user(17),
        Path(5),
        ValidatedJson(sample_request()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn test_delete_post_still_requires_admin() {
    let state = test_state(TestStore::default());

    let err = delete_post(State(state), regular_user(17), Path(5))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn test_admin_can_delete_post() {
    let mut posts = MockPostRepository::new();
    posts.expect_delete().with(eq(5)).returning(|_| Ok(()));

    let state = test_state(TestStore {
        posts: Arc::new(posts),
        ..Default::default()
    });

    let status = delete_post(State(state), admin_user(1), Path(5))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}
