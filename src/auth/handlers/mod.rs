//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Handlers
//!
//! - **`signup`** - PUT /auth/signup - User registration
//! - **`login`** - POST /auth/login - Issue a token
//! - **`get_status`** / **`update_status`** - GET/PATCH /auth/status -
//!   Status of the authenticated caller
//!
//! Signup and login are public; the status pair runs behind the
//! authorization guard.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Status get/set handlers
pub mod status;

pub use types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse, StatusResponse};

pub use login::login;
pub use signup::signup;
pub use status::{get_status, update_status};
