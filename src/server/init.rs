/**
 * Server Initialization
 *
 * One-time construction of everything process-wide, in dependency order:
 *
 * 1. Configuration from the environment
 * 2. The feed-event broadcast channel — created exactly once here and
 *    injected through `AppState`, so nothing can publish before it exists
 * 3. The feed store (PostgreSQL, or in-memory fallback)
 * 4. The disk image store (its directory is also served at `/images`)
 * 5. The token manager
 * 6. The router over the assembled state
 */

use axum::Router;
use tokio::sync::broadcast;

use crate::auth::tokens::TokenManager;
use crate::images::{DiskImageStore, ImageError};
use crate::realtime::broadcast::FeedEvent;
use crate::routes::router::create_router;
use crate::server::config;
use crate::server::state::AppState;

/// Capacity of the feed-event channel. Slow subscribers past this many
/// buffered events skip ahead rather than block publishers.
const FEED_CHANNEL_CAPACITY: usize = 1024;

/// Create and configure the application router.
///
/// Fails only when the image directory cannot be created; persistence
/// problems degrade to the in-memory store instead (see `config`).
pub async fn create_app() -> Result<Router<()>, ImageError> {
    tracing::info!("Initializing feedcast server");

    let config = config::load();

    let (feed_broadcast, _) = broadcast::channel::<FeedEvent>(FEED_CHANNEL_CAPACITY);

    let store = config::load_store().await;
    let images = DiskImageStore::new(&config.images_dir).await?;

    let state = AppState {
        store,
        images: std::sync::Arc::new(images),
        feed_broadcast,
        tokens: TokenManager::new(config.jwt_secret),
    };

    tracing::info!("State assembled, building router");

    Ok(create_router(state, &config.images_dir))
}
