/**
 * Update Post Handler
 *
 * PUT /feed/post/{post_id}. Runs behind the authorization guard. The image
 * part is either a replacement upload or the existing reference passed
 * through as text; the pipeline performs the load-then-ownership check and
 * schedules release of a replaced image.
 */

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::feed::handlers::form::read_post_form;
use crate::feed::handlers::types::PostEnvelope;
use crate::feed::pipeline::{self, UpdatePostInput};
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<PostEnvelope>, ApiError> {
    let form = read_post_form(multipart).await?;

    let post = pipeline::update_post(
        &state,
        user.user_id,
        post_id,
        UpdatePostInput {
            title: form.title,
            content: form.content,
            image: form.image,
            existing_image: form.existing_image,
        },
    )
    .await?;

    Ok(Json(PostEnvelope {
        message: "Post updated".to_string(),
        post,
    }))
}
