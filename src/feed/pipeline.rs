/**
 * Mutation Pipeline
 *
 * Orchestrates every post mutation:
 * validate → authorize-ownership → persist → update owner relation →
 * broadcast → respond.
 *
 * # Ordering Guarantees
 *
 * Within one request the broadcast fires only after the mutation is
 * persisted, and the requester's response never precedes persistence.
 * Across requests there is no total order; each request only preserves its
 * own persist→broadcast chain.
 *
 * # Ownership
 *
 * Update and delete load the post first and then apply the same ownership
 * predicate (`Post::is_owned_by`); ownership is never assumed from input.
 *
 * # Best-Effort Steps
 *
 * Image release (update/delete) runs as a detached task. Pruning the
 * owner-set after a delete may fail independently of the record removal;
 * the failure is logged and swallowed, leaving a dangling reference that an
 * idempotent retry of `remove_post_ref` can clean up later. Neither failure
 * changes the response.
 */

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::feed::handlers::types::PostResponse;
use crate::feed::validation;
use crate::images::{self, ImageUpload};
use crate::realtime::broadcast::{broadcast_event, FeedEvent};
use crate::server::state::AppState;
use crate::store::{CreatorSummary, Post, PostWithCreator};

/// Fixed page size for the public listing.
pub const POSTS_PER_PAGE: i64 = 2;

/// Input for a create mutation.
#[derive(Debug)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

/// Input for an update mutation. `existing_image` is the reference the
/// client wants to keep when no new file is uploaded.
#[derive(Debug)]
pub struct UpdatePostInput {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
    pub existing_image: Option<String>,
}

/// A page of posts plus the total count for client-side pagination math.
#[derive(Debug)]
pub struct PostPage {
    pub posts: Vec<PostResponse>,
    pub total_items: i64,
}

fn ensure_owner(post: &Post, user_id: Uuid) -> Result<(), ApiError> {
    if !post.is_owned_by(user_id) {
        tracing::warn!(
            "User {} denied mutation of post {} owned by {}",
            user_id,
            post.id,
            post.creator_id
        );
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// Create a post on behalf of the authenticated user.
pub async fn create_post(
    state: &AppState,
    user_id: Uuid,
    input: CreatePostInput,
) -> Result<PostResponse, ApiError> {
    // 1. Validate; nothing is stored on failure.
    let mut errors = validation::validate_post_fields(&input.title, &input.content);
    validation::validate_create_image(input.image.as_ref(), &mut errors);
    let upload = match (input.image, errors.is_empty()) {
        (Some(upload), true) => upload,
        _ => return Err(ApiError::Validation { errors }),
    };

    let creator = state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found!"))?;

    // 2. Store the image, then persist the post.
    let image_url = state
        .images
        .store(upload.bytes, &upload.content_type)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to store image: {e}")))?;

    let post = Post::new(input.title, input.content, image_url, user_id);
    state.store.insert_post(&post).await?;

    // 3. Append to the owner's post set.
    state.store.add_post_ref(user_id, post.id).await?;

    // 4. Broadcast, strictly after persistence.
    let response = PostResponse::from(PostWithCreator {
        post,
        creator: CreatorSummary {
            id: creator.id,
            name: creator.name,
        },
    });
    broadcast_event(
        &state.feed_broadcast,
        FeedEvent::Create {
            post: response.clone(),
        },
    );

    // 5. The caller's response.
    Ok(response)
}

/// Update a post; only its creator may do this.
pub async fn update_post(
    state: &AppState,
    user_id: Uuid,
    post_id: Uuid,
    input: UpdatePostInput,
) -> Result<PostResponse, ApiError> {
    let mut errors = validation::validate_post_fields(&input.title, &input.content);
    validation::validate_update_image(
        input.image.as_ref(),
        input.existing_image.as_deref(),
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation { errors });
    }

    let existing = state
        .store
        .find_post_by_id(post_id)
        .await?
        .ok_or(ApiError::NotFound("Could not find post!"))?;

    // Ownership is checked against the loaded record, never the input.
    ensure_owner(&existing.post, user_id)?;

    let image_url = match input.image {
        Some(upload) => state
            .images
            .store(upload.bytes, &upload.content_type)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to store image: {e}")))?,
        None => input.existing_image.unwrap_or_default(),
    };

    // A replaced image is released out-of-band; the mutation never waits on it.
    if existing.post.image_url != image_url {
        images::release_detached(state.images.clone(), existing.post.image_url.clone());
    }

    let mut post = existing.post;
    post.title = input.title;
    post.content = input.content;
    post.image_url = image_url;
    post.updated_at = Utc::now();
    state.store.update_post(&post).await?;

    let response = PostResponse::from(PostWithCreator {
        post,
        creator: existing.creator,
    });
    broadcast_event(
        &state.feed_broadcast,
        FeedEvent::Update {
            post: response.clone(),
        },
    );

    Ok(response)
}

/// Delete a post; only its creator may do this.
pub async fn delete_post(state: &AppState, user_id: Uuid, post_id: Uuid) -> Result<(), ApiError> {
    let existing = state
        .store
        .find_post_by_id(post_id)
        .await?
        .ok_or(ApiError::NotFound("Could not find post!"))?;

    ensure_owner(&existing.post, user_id)?;

    // Best-effort image release, then the two-step removal: record first,
    // owner-set prune second. The prune may fail after the record is gone.
    images::release_detached(state.images.clone(), existing.post.image_url.clone());

    let removed = state.store.delete_post(post_id).await?;
    if !removed {
        // Lost a race with another delete of the same post.
        return Err(ApiError::NotFound("Could not find post!"));
    }

    if let Err(e) = state.store.remove_post_ref(user_id, post_id).await {
        tracing::warn!(
            "Owner-set prune failed for user {} post {}: {} (dangling reference left behind)",
            user_id,
            post_id,
            e
        );
    }

    broadcast_event(&state.feed_broadcast, FeedEvent::Delete { post: post_id });

    Ok(())
}

/// Fetch a single post.
pub async fn get_post(state: &AppState, post_id: Uuid) -> Result<PostResponse, ApiError> {
    let found = state
        .store
        .find_post_by_id(post_id)
        .await?
        .ok_or(ApiError::NotFound("Could not find post!"))?;

    Ok(PostResponse::from(found))
}

/// Fetch one page of the feed, newest first.
pub async fn list_posts(state: &AppState, page: i64) -> Result<PostPage, ApiError> {
    let page = page.max(1);

    let total_items = state.store.count_posts().await?;
    let posts = state
        .store
        .list_posts((page - 1) * POSTS_PER_PAGE, POSTS_PER_PAGE)
        .await?;

    Ok(PostPage {
        posts: posts.into_iter().map(PostResponse::from).collect(),
        total_items,
    })
}
