//! Seed command - loads development fixtures.
//!
//! Creates one administrator, ten regular users, six categories, a batch of
//! posts and comments in every moderation status. Mirrors the data a fresh
//! development environment needs to exercise the whole API.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{CommentStatus, Password, PostDraft, UserRole, UserUpdate};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, Store};

const ADMIN_EMAIL: &str = "admin@blog.fr";
const ADMIN_PASSWORD: &str = "admin123!";
const USER_PASSWORD: &str = "password123";
const USER_COUNT: usize = 10;
const POST_COUNT: usize = 20;

const CATEGORIES: &[(&str, &str)] = &[
    ("Rust", "Systems programming and the Rust ecosystem"),
    ("Web", "Web development, frameworks and protocols"),
    ("Databases", "Storage engines, SQL and data modeling"),
    ("DevOps", "Deployment, observability and tooling"),
    ("Security", "Application security and cryptography"),
    ("Opinion", "Essays and commentary"),
];

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let store = Persistence::new(db.get_connection());

    if store.users().find_by_email(ADMIN_EMAIL).await?.is_some() {
        if !args.force {
            tracing::info!("Fixtures already present, nothing to do (use --force to re-seed)");
            return Ok(());
        }
        tracing::warn!("Re-seeding on top of existing data");
    }

    tracing::info!("Loading fixtures...");

    // Administrator
    let admin_hash = Password::new(ADMIN_PASSWORD)?.into_string();
    let admin = store
        .users()
        .create(
            ADMIN_EMAIL.to_string(),
            admin_hash,
            "Admin".to_string(),
            "Blog".to_string(),
        )
        .await?;
    store
        .users()
        .update(
            admin.id,
            UserUpdate {
                roles: Some(vec![UserRole::User, UserRole::Admin]),
                ..Default::default()
            },
        )
        .await?;

    // Regular users
    let user_hash = Password::new(USER_PASSWORD)?.into_string();
    let mut user_ids = Vec::with_capacity(USER_COUNT);
    for i in 1..=USER_COUNT {
        let user = store
            .users()
            .create(
                format!("user{}@blog.fr", i),
                user_hash.clone(),
                format!("User{}", i),
                "Fixture".to_string(),
            )
            .await?;
        user_ids.push(user.id);
    }

    // Categories
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = store
            .categories()
            .create((*name).to_string(), Some((*description).to_string()))
            .await?;
        category_ids.push(category.id);
    }

    // Posts, spread across categories
    let mut post_ids = Vec::with_capacity(POST_COUNT);
    for i in 1..=POST_COUNT {
        let category_id = category_ids[(i - 1) % category_ids.len()];
        let post = store
            .posts()
            .create(
                admin.id,
                PostDraft {
                    title: format!("Fixture post {}", i),
                    content: format!(
                        "This is the body of fixture post number {}. It exists so the \
                         listing, pagination and detail pages have something to show.",
                        i
                    ),
                    picture: format!("https://picsum.photos/seed/{}/800/400", i),
                    category_id,
                },
            )
            .await?;
        post_ids.push(post.id);
    }

    // Comments in every moderation status
    let statuses = [
        CommentStatus::Pending,
        CommentStatus::Approved,
        CommentStatus::Rejected,
    ];
    for (i, post_id) in post_ids.iter().enumerate() {
        for (j, status) in statuses.iter().enumerate() {
            let author_id = user_ids[(i + j) % user_ids.len()];
            let comment = store
                .comments()
                .create(
                    author_id,
                    *post_id,
                    format!("Fixture comment {} on post {}", j + 1, post_id),
                )
                .await?;

            if *status != CommentStatus::Pending {
                store.comments().set_status(comment.id, *status).await?;
            }
        }
    }

    tracing::info!(
        users = USER_COUNT + 1,
        categories = CATEGORIES.len(),
        posts = POST_COUNT,
        "Fixtures loaded"
    );
    tracing::info!("Admin login: {} / {}", ADMIN_EMAIL, ADMIN_PASSWORD);

    Ok(())
}
