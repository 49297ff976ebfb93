/**
 * Server Configuration
 *
 * Environment-driven configuration with logged fallbacks. Configuration
 * problems degrade rather than abort where that is safe: a missing or
 * unreachable database falls back to the in-memory store so the server
 * stays usable in development, with a clear warning that nothing persists.
 */

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use crate::store::{FeedStore, MemoryFeedStore, PgFeedStore};

/// Development fallback used when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "feedcast-dev-secret-change-in-production";

/// Static configuration read once at startup.
pub struct ServerConfig {
    /// Secret for signing identity tokens
    pub jwt_secret: String,
    /// Directory images are stored in and served from
    pub images_dir: PathBuf,
}

/// Load static configuration from the environment.
pub fn load() -> ServerConfig {
    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using the development secret");
        DEV_JWT_SECRET.to_string()
    });

    let images_dir = std::env::var("IMAGES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("images"));

    ServerConfig {
        jwt_secret,
        images_dir,
    }
}

/// Connect the feed store.
///
/// With `DATABASE_URL` set this connects a PostgreSQL pool and applies
/// migrations; otherwise, or when the connection fails, it falls back to
/// the in-memory store with a warning.
pub async fn load_store() -> Arc<dyn FeedStore> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store (nothing persists)");
            return Arc::new(MemoryFeedStore::new());
        }
    };

    tracing::info!("Connecting to database...");
    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {e}");
            tracing::warn!("Falling back to the in-memory store (nothing persists)");
            return Arc::new(MemoryFeedStore::new());
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            // Migrations may already be applied by an operator; keep going.
            tracing::error!("Failed to run database migrations: {e}");
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(PgFeedStore::new(pool))
}
