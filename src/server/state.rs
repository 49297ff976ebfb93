/**
 * Application State
 *
 * The central state container threaded through every handler. All
 * process-wide resources live here and are constructed exactly once in
 * server init, then injected by reference — there is no ambient global to
 * initialize before use.
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and safe for concurrent use: the stores
 * behind `Arc`, the broadcast sender by design, and the token manager by
 * being immutable.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they need (e.g. the SSE handler takes only the broadcast sender).
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::tokens::TokenManager;
use crate::images::ImageStore;
use crate::realtime::broadcast::FeedEventBroadcast;
use crate::store::FeedStore;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence for users, posts, and the owner-set relation
    pub store: Arc<dyn FeedStore>,

    /// Storage for post images
    pub images: Arc<dyn ImageStore>,

    /// Broadcast sender for feed mutation events, created once at startup
    pub feed_broadcast: FeedEventBroadcast,

    /// Token issuing and verification
    pub tokens: TokenManager,
}

impl FromRef<AppState> for Arc<dyn FeedStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ImageStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}

impl FromRef<AppState> for FeedEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.feed_broadcast.clone()
    }
}

impl FromRef<AppState> for TokenManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

#[cfg(test)]
impl AppState {
    /// State over in-memory persistence and a throwaway image directory,
    /// for unit tests. Returns the image directory for assertions.
    pub(crate) async fn for_tests() -> (AppState, std::path::PathBuf) {
        use crate::images::DiskImageStore;
        use crate::store::MemoryFeedStore;

        let dir = std::env::temp_dir().join(format!("feedcast-test-{}", uuid::Uuid::new_v4()));
        let images = DiskImageStore::new(&dir)
            .await
            .expect("create test image dir");
        let (feed_broadcast, _) = tokio::sync::broadcast::channel(64);

        let state = AppState {
            store: Arc::new(MemoryFeedStore::new()),
            images: Arc::new(images),
            feed_broadcast,
            tokens: TokenManager::new("test-secret"),
        };
        (state, dir)
    }
}
