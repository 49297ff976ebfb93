/**
 * Get Post Handler
 *
 * GET /feed/post/{post_id}. Public within the service's trust boundary.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::feed::handlers::types::PostEnvelope;
use crate::feed::pipeline;
use crate::server::state::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post = pipeline::get_post(&state, post_id).await?;

    Ok(Json(PostEnvelope {
        message: "Post fetched!".to_string(),
        post,
    }))
}
