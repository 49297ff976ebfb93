/**
 * Signup Handler
 *
 * User registration for PUT /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email shape, password length, and display name
 * 2. Reject already-registered emails
 * 3. Hash the password (bcrypt, off the async runtime)
 * 4. Persist the user
 * 5. Respond 201 with the new user id
 *
 * Validation failures are reported with field-level detail and nothing is
 * persisted. No token is issued here; clients log in afterwards.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::auth::credentials::hash_password;
use crate::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::error::{ApiError, FieldError};
use crate::server::state::AppState;
use crate::store::User;

/// Minimum accepted password length (after trimming).
const MIN_PASSWORD_LEN: usize = 5;

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let email = request.email.trim().to_lowercase();
    let name = request.name.trim().to_string();

    let mut errors = Vec::new();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }
    if request.password.trim().len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 5 characters",
        ));
    }
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name must not be empty"));
    }

    // Only consult the store once the shape checks pass on the email itself.
    if errors.is_empty() && state.store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Signup rejected, email already registered: {}", email);
        errors.push(FieldError::new("email", "E-mail address already exists"));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation { errors });
    }

    let password_hash = hash_password(request.password).await?;
    let user = User::new(email, name, password_hash);
    state.store.insert_user(&user).await?;

    tracing::info!("User created: {} ({})", user.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created!".to_string(),
            user_id: user.id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_success() {
        let (state, _dir) = AppState::for_tests().await;

        let request = SignupRequest {
            email: "New.User@Example.com".to_string(),
            name: "New User".to_string(),
            password: "password123".to_string(),
        };

        let (status, Json(response)) = signup(State(state.clone()), Json(request)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.message, "User created!");

        // Email is normalized before storage
        let stored = state
            .store
            .find_user_by_email("new.user@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, response.user_id);
        assert_eq!(stored.status, "I am new!");
    }

    #[tokio::test]
    async fn test_signup_invalid_input_persists_nothing() {
        let (state, _dir) = AppState::for_tests().await;

        let request = SignupRequest {
            email: "not-an-email".to_string(),
            name: "".to_string(),
            password: "shrt".to_string(),
        };

        let err = signup(State(state.clone()), Json(request)).await.unwrap_err();
        match err {
            ApiError::Validation { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"email"));
                assert!(fields.contains(&"password"));
                assert!(fields.contains(&"name"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (state, _dir) = AppState::for_tests().await;

        let first = SignupRequest {
            email: "dup@example.com".to_string(),
            name: "First".to_string(),
            password: "password123".to_string(),
        };
        signup(State(state.clone()), Json(first)).await.unwrap();

        let second = SignupRequest {
            email: "dup@example.com".to_string(),
            name: "Second".to_string(),
            password: "password123".to_string(),
        };
        let err = signup(State(state), Json(second)).await.unwrap_err();
        match err {
            ApiError::Validation { errors } => {
                assert_eq!(errors[0].field, "email");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_email_shape_check() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ax.com"));
    }
}
