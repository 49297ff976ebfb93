/**
 * Credential Hashing
 *
 * bcrypt hashing and verification. Both operations are computationally
 * expensive on purpose, so they always run on the blocking thread pool via
 * `spawn_blocking` and never stall the async runtime that is serving
 * unrelated requests.
 */

use crate::error::ApiError;

/// Hash a password for storage.
pub async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("password verification failed: {e}")))
}
