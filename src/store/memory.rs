/**
 * In-Memory Feed Store
 *
 * A `FeedStore` backed by process-local maps. Used by the test suite and as
 * the startup fallback when no `DATABASE_URL` is configured, so the server
 * stays usable (without durability) in development.
 *
 * Interior mutability uses a plain `std::sync::Mutex`; every critical
 * section is short and never crosses an await point.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::store::{CreatorSummary, FeedStore, Post, PostWithCreator, StoreError, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    /// Owner-set: user id -> ids of posts they created
    refs: HashMap<Uuid, HashSet<Uuid>>,
}

/// In-memory `FeedStore` implementation.
#[derive(Default)]
pub struct MemoryFeedStore {
    inner: Mutex<Inner>,
}

impl MemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_creator(inner: &Inner, post: &Post) -> PostWithCreator {
    let name = inner
        .users
        .get(&post.creator_id)
        .map(|u| u.name.clone())
        .unwrap_or_default();
    PostWithCreator {
        post: post.clone(),
        creator: CreatorSummary {
            id: post.creator_id,
            name,
        },
    }
}

#[async_trait]
impl FeedStore for MemoryFeedStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.users.get_mut(&id).map(|user| {
            user.status = status.to_string();
            user.updated_at = chrono::Utc::now();
            user.clone()
        }))
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostWithCreator>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .posts
            .get(&id)
            .cloned()
            .map(|post| with_creator(&inner, &post)))
    }

    async fn update_post(&self, post: &Post) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.posts.remove(&id).is_some())
    }

    async fn list_posts(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PostWithCreator>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut posts: Vec<&Post> = inner.posts.values().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|post| with_creator(&inner, post))
            .collect())
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.len() as i64)
    }

    async fn add_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.refs.entry(user_id).or_default().insert(post_id);
        Ok(())
    }

    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(set) = inner.refs.get_mut(&user_id) {
            set.remove(&post_id);
        }
        Ok(())
    }

    async fn post_refs(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .refs
            .get(&user_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }
}
