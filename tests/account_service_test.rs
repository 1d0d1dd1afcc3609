//! Account service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use blog_api::domain::{User, UserRole, UserUpdate};
use blog_api::errors::AppError;
use blog_api::infra::repositories::{
    CategoryRepository, CommentRepository, MockCategoryRepository, MockCommentRepository,
    MockPostRepository, MockUserRepository, PostRepository, UserRepository,
};
use blog_api::infra::Store;
use blog_api::services::{AccountManager, AccountService, MockActionTokenVerifier};

fn sample_user(id: i64, is_active: bool) -> User {
    User {
        id,
        email: format!("user{}@example.com", id),
        password_hash: "hashed".to_string(),
        roles: vec![UserRole::User],
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        profile_picture: None,
        created_at: Utc::now(),
        updated_at: None,
        is_active,
    }
}

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

fn manager(
    users: MockUserRepository,
    tokens: MockActionTokenVerifier,
) -> AccountManager<TestStore> {
    let store = TestStore {
        users: Arc::new(users),
        ..Default::default()
    };
    AccountManager::new(Arc::new(store), Arc::new(tokens))
}

#[tokio::test]
async fn test_toggle_deactivates_active_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(sample_user(id, true))));
    users
        .expect_set_active()
        .with(eq(5), eq(false))
        .returning(|id, active| Ok(sample_user(id, active)));

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .with(eq("tok"), eq("toggle_user"), eq(5))
        .returning(|_, _, _| Ok(()));

    let service = manager(users, tokens);
    let user = service.toggle_active(5, 1, "tok").await.unwrap();

    assert!(!user.is_active);
}

#[tokio::test]
async fn test_toggle_reactivates_disabled_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_user(id, false))));
    users
        .expect_set_active()
        .with(eq(5), eq(true))
        .returning(|id, active| Ok(sample_user(id, active)));

    let mut tokens = MockActionTokenVerifier::new();
    tokens.expect_verify().returning(|_, _, _| Ok(()));

    let service = manager(users, tokens);
    let user = service.toggle_active(5, 1, "tok").await.unwrap();

    assert!(user.is_active);
}

#[tokio::test]
async fn test_admin_cannot_deactivate_own_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_user(id, true))));
    // No set_active expectation and no token expectation: the self-check
    // fires before either would run

    let tokens = MockActionTokenVerifier::new();

    let service = manager(users, tokens);
    let err = service.toggle_active(5, 5, "tok").await.unwrap_err();

    assert!(matches!(err, AppError::SelfDeactivation));
}

#[tokio::test]
async fn test_toggle_invalid_token_leaves_account_unchanged() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_user(id, true))));

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .returning(|_, _, _| Err(AppError::InvalidActionToken));

    let service = manager(users, tokens);
    let err = service.toggle_active(5, 1, "bad").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidActionToken));
}

#[tokio::test]
async fn test_toggle_missing_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = manager(users, MockActionTokenVerifier::new());
    let err = service.toggle_active(99, 1, "tok").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_update_rejects_email_taken_by_other_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("user3@example.com"))
        .returning(|_| Ok(Some(sample_user(3, true))));

    let service = manager(users, MockActionTokenVerifier::new());
    let changes = UserUpdate {
        email: Some("user3@example.com".to_string()),
        ..Default::default()
    };
    let err = service.update_user(5, changes).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_allows_keeping_own_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(sample_user(5, true))));
    users
        .expect_update()
        .returning(|id, _| Ok(sample_user(id, true)));

    let service = manager(users, MockActionTokenVerifier::new());
    let changes = UserUpdate {
        email: Some("user5@example.com".to_string()),
        first_name: Some("Renamed".to_string()),
        ..Default::default()
    };

    assert!(service.update_user(5, changes).await.is_ok());
}

#[tokio::test]
async fn test_list_users_reports_pagination_meta() {
    let mut users = MockUserRepository::new();
    users
        .expect_list_page()
        .with(eq(1), eq(20))
        .returning(|_, _| Ok((vec![sample_user(1, true), sample_user(2, false)], 41)));

    let service = manager(users, MockActionTokenVerifier::new());
    let page = service.list_users(1).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 41);
    assert_eq!(page.meta.total_pages, 3);
}
