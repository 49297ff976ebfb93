//! Error Module
//!
//! Service-wide error taxonomy and its conversion to HTTP responses.
//!
//! Domain errors (validation, authentication, ownership, missing entities)
//! carry a specific caller-facing status; storage and internal faults are
//! logged in full but surface as a generic server error without detail.

/// Error type definitions
pub mod types;

/// Conversions to HTTP responses
pub mod conversion;

pub use types::{ApiError, FieldError};
