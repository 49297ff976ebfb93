/**
 * Authorization Guard
 *
 * Middleware protecting routes that require an authenticated caller. It
 * extracts the Bearer token from the Authorization header, verifies it, and
 * attaches the resolved identity to the request extensions. The guard always
 * runs to completion (identity attached or request rejected) before a
 * protected handler executes, so no mutation can happen on behalf of an
 * unauthenticated caller.
 *
 * # Rejection Classes
 *
 * - Missing header, non-Bearer header, malformed/expired/bad-signature
 *   token: 401, the expected caller-facing class
 * - A token that verifies but carries an unparseable subject: 500; such a
 *   token can only come from a misconfigured issuer, not from a client
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::tokens::TokenError;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Caller identity resolved by the guard.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authorization guard middleware.
///
/// On success the request proceeds with an [`AuthenticatedUser`] in its
/// extensions; on failure the request is rejected before the handler runs.
pub async fn auth_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::Unauthenticated
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Authorization header is not a Bearer token");
        ApiError::Unauthenticated
    })?;

    let claims = state.tokens.verify(token).map_err(|e| match e {
        TokenError::Rejected(err) => {
            tracing::warn!("Token rejected: {err}");
            ApiError::Unauthenticated
        }
        other => {
            tracing::error!("Token verification fault: {other}");
            ApiError::Internal(other.to_string())
        }
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::error!("Verified token carries unparseable subject: {}", claims.sub);
        ApiError::Internal("invalid subject claim".to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Extractor for the identity the guard attached.
///
/// Only usable on routes layered with [`auth_guard`]; elsewhere the
/// extension is absent and extraction rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser missing from request extensions");
                ApiError::Unauthenticated
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;

    #[tokio::test]
    async fn test_extract_authenticated_user() {
        let (state, _dir) = AppState::for_tests().await;

        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
        };
        parts.extensions.insert(user.clone());

        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(extracted.user_id, user.user_id);
        assert_eq!(extracted.email, user.email);
    }

    #[tokio::test]
    async fn test_extract_without_guard_rejects() {
        let (state, _dir) = AppState::for_tests().await;

        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
