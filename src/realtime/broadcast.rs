/**
 * Feed Event Broadcasting
 *
 * The event type published after every persisted mutation, and the helper
 * that fans it out. Built on `tokio::sync::broadcast`: every currently
 * subscribed listener gets a copy, publishing never blocks on slow
 * listeners, and nothing is retained for listeners that connect later.
 *
 * The sender is created once in server init and injected through
 * `AppState`; there is no ambient global hub to initialize.
 */

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::feed::handlers::types::PostResponse;

/// Sender half of the feed event channel, cloned into every publisher.
pub type FeedEventBroadcast = broadcast::Sender<FeedEvent>;

/// A mutation notification, serialized onto the wire as
/// `{"action": "create" | "update" | "delete", "post": ...}`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum FeedEvent {
    Create { post: PostResponse },
    Update { post: PostResponse },
    /// Carries only the removed post's id
    Delete { post: Uuid },
}

/// Publish an event to all current subscribers.
///
/// Returns the number of subscribers that received it; zero subscribers is
/// a normal condition, not an error.
pub fn broadcast_event(broadcast_tx: &FeedEventBroadcast, event: FeedEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Feed] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Feed] No subscribers to receive event");
            0
        }
    }
}
