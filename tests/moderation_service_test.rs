//! Moderation service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use blog_api::domain::{Comment, CommentStatus, Post, StatusFilter};
use blog_api::errors::AppError;
use blog_api::infra::repositories::{
    CategoryRepository, CommentRepository, MockCategoryRepository, MockCommentRepository,
    MockPostRepository, MockUserRepository, PostRepository, UserRepository,
};
use blog_api::infra::Store;
use blog_api::services::{MockActionTokenVerifier, ModerationService, Moderator};

fn sample_comment(id: i64, status: CommentStatus) -> Comment {
    Comment {
        id,
        content: "A comment".to_string(),
        status,
        created_at: Utc::now(),
        author_id: 1,
        post_id: 10,
    }
}

fn sample_post(id: i64) -> Post {
    Post {
        id,
        title: "A post".to_string(),
        content: "Some content long enough".to_string(),
        picture: "https://example.com/p.jpg".to_string(),
        published_at: Utc::now(),
        author_id: 1,
        category_id: 1,
    }
}

/// Store backed by mock repositories.
///
/// Expectations are set on the mocks before construction; any call without
/// an expectation panics, which doubles as a "was never called" assertion.
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

fn moderator(
    comments: MockCommentRepository,
    posts: MockPostRepository,
    tokens: MockActionTokenVerifier,
) -> Moderator<TestStore> {
    let store = TestStore {
        comments: Arc::new(comments),
        posts: Arc::new(posts),
        ..Default::default()
    };
    Moderator::new(Arc::new(store), Arc::new(tokens))
}

#[tokio::test]
async fn test_approve_pending_comment() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Pending))));
    comments
        .expect_set_status()
        .with(eq(7), eq(CommentStatus::Approved))
        .returning(|id, status| Ok(sample_comment(id, status)));

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .with(eq("tok"), eq("approve_comment"), eq(7))
        .returning(|_, _, _| Ok(()));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let comment = service.approve(7, "tok").await.unwrap();

    assert_eq!(comment.status, CommentStatus::Approved);
}

#[tokio::test]
async fn test_approve_is_idempotent() {
    // Approving an already approved comment succeeds and stays approved
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Approved))));
    comments
        .expect_set_status()
        .returning(|id, status| Ok(sample_comment(id, status)));

    let mut tokens = MockActionTokenVerifier::new();
    tokens.expect_verify().returning(|_, _, _| Ok(()));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let comment = service.approve(7, "tok").await.unwrap();

    assert_eq!(comment.status, CommentStatus::Approved);
}

#[tokio::test]
async fn test_reject_previously_approved_comment() {
    // Re-transition is allowed; only the current status is stored
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Approved))));
    comments
        .expect_set_status()
        .with(eq(7), eq(CommentStatus::Rejected))
        .returning(|id, status| Ok(sample_comment(id, status)));

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .with(eq("tok"), eq("reject_comment"), eq(7))
        .returning(|_, _, _| Ok(()));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let comment = service.reject(7, "tok").await.unwrap();

    assert_eq!(comment.status, CommentStatus::Rejected);
}

#[tokio::test]
async fn test_invalid_token_leaves_status_unchanged() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Pending))));
    // No set_status expectation: a write after a bad token would panic

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .returning(|_, _, _| Err(AppError::InvalidActionToken));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let err = service.approve(7, "bad").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidActionToken));
}

#[tokio::test]
async fn test_approve_missing_comment_is_not_found() {
    // The target is loaded before the token is checked, so a missing id
    // reports NotFound even with a garbage token
    let mut comments = MockCommentRepository::new();
    comments.expect_find_by_id().returning(|_| Ok(None));

    let tokens = MockActionTokenVerifier::new();

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let err = service.approve(99, "anything").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_delete_requires_valid_token() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Rejected))));

    let mut tokens = MockActionTokenVerifier::new();
    tokens
        .expect_verify()
        .with(eq("tok"), eq("delete_comment"), eq(7))
        .returning(|_, _, _| Err(AppError::InvalidActionToken));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    let err = service.delete_comment(7, "tok").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidActionToken));
}

#[tokio::test]
async fn test_delete_hard_deletes_any_status() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_comment(id, CommentStatus::Approved))));
    comments.expect_delete().with(eq(7)).returning(|_| Ok(()));

    let mut tokens = MockActionTokenVerifier::new();
    tokens.expect_verify().returning(|_, _, _| Ok(()));

    let service = moderator(comments, MockPostRepository::new(), tokens);
    assert!(service.delete_comment(7, "tok").await.is_ok());
}

#[tokio::test]
async fn test_submit_creates_pending_comment() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .with(eq(10))
        .returning(|id| Ok(Some(sample_post(id))));

    let mut comments = MockCommentRepository::new();
    comments
        .expect_create()
        .with(eq(1), eq(10), eq("Hello".to_string()))
        .returning(|author_id, post_id, content| {
            Ok(Comment {
                id: 42,
                content,
                status: CommentStatus::Pending,
                created_at: Utc::now(),
                author_id,
                post_id,
            })
        });

    let service = moderator(comments, posts, MockActionTokenVerifier::new());
    let comment = service.submit(1, 10, "Hello".to_string()).await.unwrap();

    assert_eq!(comment.status, CommentStatus::Pending);
    assert_eq!(comment.post_id, 10);
}

#[tokio::test]
async fn test_submit_on_missing_post_is_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().returning(|_| Ok(None));

    let service = moderator(
        MockCommentRepository::new(),
        posts,
        MockActionTokenVerifier::new(),
    );
    let err = service.submit(1, 99, "Hello".to_string()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_list_comments_passes_status_filter() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_page()
        .with(eq(StatusFilter::Pending), eq(2), eq(20))
        .returning(|_, _, _| {
            Ok((
                vec![sample_comment(1, CommentStatus::Pending)],
                21,
            ))
        });

    let service = moderator(
        comments,
        MockPostRepository::new(),
        MockActionTokenVerifier::new(),
    );
    let page = service.list_comments(StatusFilter::Pending, 2).await.unwrap();

    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 21);
    assert_eq!(page.meta.total_pages, 2);
}

#[tokio::test]
async fn test_approved_count_matches_listing() {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_approved_for_post().returning(|post_id| {
        Ok(vec![
            sample_comment(1, CommentStatus::Approved),
            Comment {
                post_id,
                ..sample_comment(2, CommentStatus::Approved)
            },
        ])
    });
    comments
        .expect_count_approved_for_post()
        .returning(|_| Ok(2));

    let service = moderator(
        comments,
        MockPostRepository::new(),
        MockActionTokenVerifier::new(),
    );
    let (listing, count) = service.approved_for_post(10).await.unwrap();

    assert_eq!(listing.len() as u64, count);
    assert!(listing.iter().all(|c| c.status == CommentStatus::Approved));
}
