/**
 * Authentication Handler Types
 *
 * Request and response types shared by the signup, login, and status
 * handlers. Responses serialize in camelCase to match the service's wire
 * format.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup request body.
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    /// Display name
    pub name: String,
    /// Plain password, hashed before storage
    pub password: String,
}

/// Login request body.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup. Deliberately carries no token: the client logs in
/// afterwards.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Returned by login.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT, one-hour expiry
    pub token: String,
    pub user_id: Uuid,
}

/// Returned by both status endpoints.
#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

/// PATCH /auth/status body.
#[derive(Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: String,
}
