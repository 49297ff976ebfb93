//! Middleware Module
//!
//! Request-processing middleware. Currently this is the authorization guard
//! that protects every mutating route: it resolves the caller's token to an
//! identity (or rejects the request) before the handler runs.

pub mod auth;

pub use auth::{auth_guard, AuthUser, AuthenticatedUser};
