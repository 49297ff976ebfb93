/**
 * Service Error Types
 *
 * This module defines the error taxonomy used across the service. Every
 * handler and the mutation pipeline return `ApiError`; the conversion module
 * turns it into an HTTP response.
 *
 * # Error Categories
 *
 * - `Validation` - client input malformed; reported with field-level detail,
 *   nothing persisted
 * - `Unauthenticated` - missing/invalid/expired token; rejected before any
 *   mutation
 * - `Forbidden` - authenticated caller is not the owner; rejected, no mutation
 * - `NotFound` - referenced entity absent
 * - `Storage` - persistence layer unreachable or erroring; surfaced as a
 *   generic server fault, detail logged only
 * - `Internal` - unexpected infrastructure fault (token issuance, hashing,
 *   blocking-task join); surfaced generically like `Storage`
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Field-level detail attached to validation failures.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending input field
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All errors a request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input failed validation; nothing was persisted.
    #[error("Validation failed, entered data is incorrect")]
    Validation { errors: Vec<FieldError> },

    /// Missing, malformed, or expired credentials.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Authenticated caller does not own the targeted entity.
    #[error("Not authorized!")]
    Forbidden,

    /// Referenced entity does not exist. The message is caller-facing.
    #[error("{0}")]
    NotFound(&'static str),

    /// Persistence layer fault. Detail is logged, never returned.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Unexpected infrastructure fault. Detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Shortcut for a single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
