//! Feed Module
//!
//! The post mutation pipeline and its HTTP shell.
//!
//! # Module Structure
//!
//! ```text
//! feed/
//! ├── mod.rs          - Module exports
//! ├── validation.rs   - Field-level input validation
//! ├── pipeline.rs     - Mutation pipeline (the core)
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Response types
//!     ├── form.rs     - Multipart form parsing
//!     ├── create.rs   - POST /feed/post
//!     ├── update.rs   - PUT /feed/post/{post_id}
//!     ├── delete.rs   - DELETE /feed/post/{post_id}
//!     ├── get.rs      - GET /feed/post/{post_id}
//!     └── list.rs     - GET /feed/posts
//! ```
//!
//! Handlers only parse the request and translate the pipeline's result into
//! a response; every ordering and authorization guarantee lives in
//! [`pipeline`].

/// Input validation
pub mod validation;

/// The mutation pipeline
pub mod pipeline;

/// HTTP handlers for feed endpoints
pub mod handlers;

pub use pipeline::POSTS_PER_PAGE;
