//! Feed Handlers Module
//!
//! HTTP shells over the mutation pipeline.
//!
//! # Handlers
//!
//! - **`create_post`** - POST /feed/post (multipart, guarded)
//! - **`update_post`** - PUT /feed/post/{post_id} (multipart, guarded)
//! - **`delete_post`** - DELETE /feed/post/{post_id} (guarded)
//! - **`get_post`** - GET /feed/post/{post_id} (public)
//! - **`list_posts`** - GET /feed/posts (public)

/// Response types
pub mod types;

/// Multipart form parsing
pub mod form;

/// Create handler
pub mod create;

/// Update handler
pub mod update;

/// Delete handler
pub mod delete;

/// Single-post fetch handler
pub mod get;

/// Listing handler
pub mod list;

pub use create::create_post;
pub use delete::delete_post;
pub use get::get_post;
pub use list::list_posts;
pub use update::update_post;
