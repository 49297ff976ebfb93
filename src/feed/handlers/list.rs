/**
 * List Posts Handler
 *
 * GET /feed/posts?page=N. Public; fixed page size, newest first, with the
 * total count alongside each page for client-side pagination math.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::error::ApiError;
use crate::feed::handlers::types::{ListQuery, PostListResponse};
use crate::feed::pipeline;
use crate::server::state::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let page = pipeline::list_posts(&state, query.page.unwrap_or(1)).await?;

    Ok(Json(PostListResponse {
        message: "Fetched posts successfully".to_string(),
        posts: page.posts,
        total_items: page.total_items,
    }))
}
