/**
 * Status Handlers
 *
 * Get and set the status text of the authenticated caller. Both endpoints
 * run behind the authorization guard; a user can only ever read or mutate
 * their own status.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{StatusResponse, UpdateStatusRequest};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// GET /auth/status
pub async fn get_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<StatusResponse>, ApiError> {
    let record = state
        .store
        .find_user_by_id(user.user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found!"))?;

    Ok(Json(StatusResponse {
        message: "Status is retrieved correctly!".to_string(),
        status: record.status,
    }))
}

/// PATCH /auth/status
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = request.status.trim();
    if status.is_empty() {
        return Err(ApiError::invalid_field("status", "Status must not be empty"));
    }

    let updated = state
        .store
        .update_user_status(user.user_id, status)
        .await?
        .ok_or(ApiError::NotFound("User not found!"))?;

    Ok(Json(StatusResponse {
        message: "Status is updated correctly!".to_string(),
        status: updated.status,
    }))
}
