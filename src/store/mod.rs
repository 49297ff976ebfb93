//! Persistence Layer
//!
//! The feed store contract and its implementations. The core of the service
//! talks to persistence exclusively through the [`FeedStore`] trait:
//!
//! - **`postgres`** - PostgreSQL implementation backed by a sqlx pool
//! - **`memory`** - in-memory implementation, used by the test suite and as
//!   the fallback when no database is configured
//!
//! The trait covers users, posts, and the user-owning-posts relation
//! (the "owner-set"). All operations are async and fail with [`StoreError`],
//! which is a transport/storage-class fault distinct from domain errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// In-memory store implementation
pub mod memory;

/// PostgreSQL store implementation
pub mod postgres;

pub use memory::MemoryFeedStore;
pub use postgres::PgFeedStore;

/// Storage-layer fault. Distinct from domain errors; always surfaced to
/// clients as a generic server fault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A registered user.
///
/// The owner-set (which posts this user created) is not embedded here; it
/// lives in a separate relation queried through [`FeedStore::post_refs`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    /// Unique, stored lowercased
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash, never serialized into responses by callers
    pub password_hash: String,
    /// Free-form status text, mutable by its owner only
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            status: "I am new!".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A feed post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Reference into the image store
    pub image_url: String,
    /// Immutable after creation
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: String, content: String, image_url: String, creator_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            image_url,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership predicate used by every update/delete authorization check.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}

/// The caller-facing slice of a post's creator.
#[derive(Debug, Clone, Serialize)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub name: String,
}

/// A post joined with its creator summary, as read back from the store.
#[derive(Debug, Clone)]
pub struct PostWithCreator {
    pub post: Post,
    pub creator: CreatorSummary,
}

/// Persistence contract for the feed.
///
/// CRUD plus paginated listing over posts and the user-owning-posts relation.
/// `find_user_by_email` doubles as the credential-store lookup used by login.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Returns the updated user, or `None` if the user does not exist.
    async fn update_user_status(&self, id: Uuid, status: &str)
        -> Result<Option<User>, StoreError>;

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError>;
    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostWithCreator>, StoreError>;
    async fn update_post(&self, post: &Post) -> Result<(), StoreError>;
    /// Returns whether a record was actually removed.
    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError>;
    /// Page of posts ordered by creation time, newest first.
    async fn list_posts(&self, skip: i64, limit: i64)
        -> Result<Vec<PostWithCreator>, StoreError>;
    async fn count_posts(&self) -> Result<i64, StoreError>;

    /// Append a post reference to a user's owner-set. Idempotent.
    async fn add_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
    /// Remove a post reference if present. Idempotent, so a failed prune can
    /// safely be retried by a reconciliation pass.
    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
    async fn post_refs(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
}
