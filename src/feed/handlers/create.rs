/**
 * Create Post Handler
 *
 * POST /feed/post. Runs behind the authorization guard; parses the
 * multipart form and hands off to the pipeline, which persists before it
 * broadcasts.
 */

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};

use crate::error::ApiError;
use crate::feed::handlers::form::read_post_form;
use crate::feed::handlers::types::PostEnvelope;
use crate::feed::pipeline::{self, CreatePostInput};
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostEnvelope>), ApiError> {
    let form = read_post_form(multipart).await?;

    let post = pipeline::create_post(
        &state,
        user.user_id,
        CreatePostInput {
            title: form.title,
            content: form.content,
            image: form.image,
        },
    )
    .await?;

    tracing::info!("Post {} created by {}", post.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope {
            message: "Post created successfully!".to_string(),
            post,
        }),
    ))
}
