/**
 * Feed Handler Types
 *
 * Response types for the feed endpoints. Everything serializes in camelCase
 * to match the service's wire format; the same `PostResponse` shape is used
 * in HTTP responses and broadcast events so connected clients see exactly
 * what the requester saw.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{CreatorSummary, PostWithCreator};

/// A post as returned to clients, creator summary included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: CreatorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostWithCreator> for PostResponse {
    fn from(value: PostWithCreator) -> Self {
        Self {
            id: value.post.id,
            title: value.post.title,
            content: value.post.content,
            image_url: value.post.image_url,
            creator: value.creator,
            created_at: value.post.created_at,
            updated_at: value.post.updated_at,
        }
    }
}

/// Envelope for single-post responses.
#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    pub message: String,
    pub post: PostResponse,
}

/// Envelope for the paginated listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub message: String,
    pub posts: Vec<PostResponse>,
    pub total_items: i64,
}

/// Plain acknowledgement (delete).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-based page number, defaults to the first page
    pub page: Option<i64>,
}
