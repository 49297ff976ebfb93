//! feedcast — a real-time content-feed service.
//!
//! Authenticated users create, update, and delete posts; every mutation is
//! persisted and then broadcast to all connected clients over a live event
//! stream. The crate is organized around the mutation pipeline
//! (validate → authorize-ownership → persist → update owner relation →
//! broadcast → respond) with thin HTTP and storage shells around it.
//!
//! # Architecture
//!
//! The crate is organized into focused modules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Tokens, password hashing, signup/login/status handlers
//! - **`middleware`** - The authorization guard protecting mutating routes
//! - **`feed`** - The post mutation pipeline and its HTTP handlers
//! - **`store`** - Persistence contract with Postgres and in-memory backends
//! - **`images`** - Image storage contract and disk-backed implementation
//! - **`realtime`** - Feed event broadcasting and the SSE subscription
//! - **`error`** - The service-wide error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          - Module exports and documentation
//! ├── main.rs         - Server entry point
//! ├── server/         - Initialization, state, configuration
//! ├── routes/         - Route configuration
//! ├── auth/           - Tokens, credentials, auth handlers
//! ├── middleware/     - Authorization guard
//! ├── feed/           - Mutation pipeline and feed handlers
//! ├── store/          - Persistence (Postgres + in-memory)
//! ├── images.rs       - Image storage
//! ├── realtime/       - Event broadcasting and SSE
//! └── error/          - Error types
//! ```

/// Authentication: tokens, credentials, and auth endpoints
pub mod auth;

/// Service-wide error types
pub mod error;

/// Post mutation pipeline and feed endpoints
pub mod feed;

/// Image storage
pub mod images;

/// Authorization guard middleware
pub mod middleware;

/// Real-time event broadcasting
pub mod realtime;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Persistence layer
pub mod store;

pub use error::ApiError;
pub use server::state::AppState;
