//! Real-time Module
//!
//! Feed-event broadcasting and the live subscription endpoint.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports
//! ├── broadcast.rs    - FeedEvent, sender alias, publish helper
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! Events fan out over a single `tokio::sync::broadcast` channel created
//! once at startup and carried in the application state. Delivery is
//! best-effort: no queuing for listeners that connect later, no replay, and
//! a publish with zero subscribers is not an error.

/// Event type and broadcasting utilities
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

pub use broadcast::{broadcast_event, FeedEvent, FeedEventBroadcast};
pub use subscription::handle_feed_subscription;
