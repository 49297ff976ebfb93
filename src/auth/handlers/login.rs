/**
 * Login Handler
 *
 * Credential verification and token issuance for POST /auth/login.
 *
 * # Security Notes
 *
 * - Unknown email and wrong password both return 401 without distinguishing
 *   detail, so callers cannot enumerate accounts
 * - Password verification runs through bcrypt off the async runtime
 * - Issued tokens expire after one hour
 */

use axum::{extract::State, response::Json};

use crate::auth::credentials::verify_password;
use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login rejected, unknown email: {}", email);
            ApiError::Unauthenticated
        })?;

    let valid = verify_password(request.password, user.password_hash.clone()).await?;
    if !valid {
        tracing::warn!("Login rejected, wrong password for: {}", email);
        return Err(ApiError::Unauthenticated);
    }

    let token = state.tokens.issue(user.id, &user.email).map_err(|e| {
        tracing::error!("Failed to issue token: {e}");
        ApiError::Internal(e.to_string())
    })?;

    tracing::info!("User logged in: {}", user.email);

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}
