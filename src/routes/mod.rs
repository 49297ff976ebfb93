//! Routes Module
//!
//! HTTP route configuration and router assembly.

/// Router assembly
pub mod router;

pub use router::create_router;
