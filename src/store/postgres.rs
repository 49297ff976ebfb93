/**
 * PostgreSQL Feed Store
 *
 * `FeedStore` implementation backed by a sqlx connection pool. Queries are
 * written as runtime-checked `query_as`/`query_scalar` calls with positional
 * binds; the schema lives in `migrations/` and is applied at startup.
 *
 * Post reads join the creator row so every post comes back with its creator
 * summary in one round trip.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{CreatorSummary, FeedStore, Post, PostWithCreator, StoreError, User};

/// PostgreSQL-backed `FeedStore`.
#[derive(Clone)]
pub struct PgFeedStore {
    pool: PgPool,
}

impl PgFeedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row shape for the post/creator join.
#[derive(sqlx::FromRow)]
struct PostCreatorRow {
    id: Uuid,
    title: String,
    content: String,
    image_url: String,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    creator_name: String,
}

impl From<PostCreatorRow> for PostWithCreator {
    fn from(row: PostCreatorRow) -> Self {
        PostWithCreator {
            post: Post {
                id: row.id,
                title: row.title,
                content: row.content,
                image_url: row.image_url,
                creator_id: row.creator_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            creator: CreatorSummary {
                id: row.creator_id,
                name: row.creator_name,
            },
        }
    }
}

const POST_WITH_CREATOR: &str = r#"
    SELECT p.id, p.title, p.content, p.image_url, p.creator_id,
           p.created_at, p.updated_at, u.name AS creator_name
    FROM posts p
    JOIN users u ON u.id = p.creator_id
"#;

#[async_trait]
impl FeedStore for PgFeedStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.status)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_user_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, image_url, creator_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.creator_id)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostWithCreator>, StoreError> {
        let row = sqlx::query_as::<_, PostCreatorRow>(
            &format!("{POST_WITH_CREATOR} WHERE p.id = $1"),
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostWithCreator::from))
    }

    async fn update_post(&self, post: &Post) -> Result<(), StoreError> {
        // creator_id is deliberately absent: the creator never changes.
        sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, content = $2, image_url = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.updated_at)
        .bind(post.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PostWithCreator>, StoreError> {
        let rows = sqlx::query_as::<_, PostCreatorRow>(&format!(
            "{POST_WITH_CREATOR} ORDER BY p.created_at DESC, p.id DESC OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostWithCreator::from).collect())
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn add_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_posts (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM user_posts WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn post_refs(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT post_id FROM user_posts WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }
}
