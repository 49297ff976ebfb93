//! Server Module
//!
//! Server initialization, application state, and configuration.
//!
//! - **`state`** - `AppState` and axum `FromRef` extraction
//! - **`config`** - environment-driven configuration with logged fallbacks
//! - **`init`** - one-time construction of stores, broadcast channel, state,
//!   and router

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
