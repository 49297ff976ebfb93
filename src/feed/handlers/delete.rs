/**
 * Delete Post Handler
 *
 * DELETE /feed/post/{post_id}. Runs behind the authorization guard; the
 * pipeline performs the load-then-ownership check, the best-effort image
 * release, and the two-step record/owner-set removal.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::feed::handlers::types::MessageResponse;
use crate::feed::pipeline;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    pipeline::delete_post(&state, user.user_id, post_id).await?;

    tracing::info!("Post {} deleted by {}", post_id, user.email);

    Ok(Json(MessageResponse {
        message: "The post is deleted!".to_string(),
    }))
}
