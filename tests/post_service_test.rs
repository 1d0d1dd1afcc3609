//! Post service unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use blog_api::domain::{Category, Comment, CommentStatus, Post, PostDraft};
use blog_api::errors::AppError;
use blog_api::infra::repositories::{
    CategoryRepository, CommentRepository, MockCategoryRepository, MockCommentRepository,
    MockPostRepository, MockUserRepository, PostRepository, UserRepository,
};
use blog_api::infra::Store;
use blog_api::services::{PostManager, PostService};

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

fn sample_draft() -> PostDraft {
    PostDraft {
        title: "A post".to_string(),
        content: "Some content long enough".to_string(),
        picture: "https://example.com/p.jpg".to_string(),
        category_id: 3,
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

fn post_manager(store: TestStore) -> PostManager<TestStore> {
    PostManager::new(Arc::new(store))
}

#[tokio::test]
async fn test_list_posts_clamps_out_of_range_page() {
    // 20 posts at 9 per page gives 3 pages; a request for page 9 serves
    // page 3 and says so in the metadata
    let mut posts = MockPostRepository::new();
    posts.expect_count().returning(|| Ok(20));
    posts
        .expect_find_page()
        .with(eq(3), eq(9))
        .returning(|_, _| Ok((vec![sample_post(19), sample_post(20)], 20)));

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        ..Default::default()
    });
    let page = service.list_posts(9).await.unwrap();

    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.total_pages, 3);
    assert!(!page.data.is_empty());
}

#[tokio::test]
async fn test_list_posts_empty_set_reports_page_one() {
    let mut posts = MockPostRepository::new();
    posts.expect_count().returning(|| Ok(0));
    posts
        .expect_find_page()
        .with(eq(1), eq(9))
        .returning(|_, _| Ok((vec![], 0)));

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        ..Default::default()
    });
    let page = service.list_posts(7).await.unwrap();

    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.total, 0);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_create_post_requires_existing_category() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_id().returning(|_| Ok(None));
    // No posts().create expectation: nothing may be written

    let service = post_manager(TestStore {
        categories: Arc::new(categories),
        ..Default::default()
    });
    let err = service.create_post(1, sample_draft()).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_post_with_valid_category() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .with(eq(3))
        .returning(|id| {
            Ok(Some(Category {
                id,
                name: "Rust".to_string(),
                description: None,
            }))
        });

    let mut posts = MockPostRepository::new();
    posts
        .expect_create()
        .withf(|author_id, draft| *author_id == 1 && draft.category_id == 3)
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

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        categories: Arc::new(categories),
        ..Default::default()
    });

    let post = service.create_post(1, sample_draft()).await.unwrap();

    // Every draft field survives the save
    let draft = sample_draft();
    assert_eq!(post.title, draft.title);
    assert_eq!(post.content, draft.content);
    assert_eq!(post.picture, draft.picture);
    assert_eq!(post.category_id, draft.category_id);
    assert_eq!(post.author_id, 1);
}

#[tokio::test]
async fn test_get_post_includes_approved_comments_and_count() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .with(eq(10))
        .returning(|id| Ok(Some(sample_post(id))));

    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_approved_for_post()
        .with(eq(10))
        .returning(|post_id| {
            Ok(vec![Comment {
                id: 1,
                content: "Nice".to_string(),
                status: CommentStatus::Approved,
                created_at: Utc::now(),
                author_id: 2,
                post_id,
            }])
        });
    comments
        .expect_count_approved_for_post()
        .with(eq(10))
        .returning(|_| Ok(1));

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        comments: Arc::new(comments),
        ..Default::default()
    });

    let detail = service.get_post(10).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments_count, 1);
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().returning(|_| Ok(None));

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        ..Default::default()
    });

    let err = service.get_post(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_latest_posts_uses_fixed_limit() {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_latest()
        .with(eq(3))
        .returning(|_| Ok(vec![sample_post(3), sample_post(2), sample_post(1)]));

    let service = post_manager(TestStore {
        posts: Arc::new(posts),
        ..Default::default()
    });

    let latest = service.latest_posts().await.unwrap();
    assert_eq!(latest.len(), 3);
}
