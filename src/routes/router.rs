/**
 * Router Configuration
 *
 * Assembles all HTTP routes into a single Axum router.
 *
 * # Route Map
 *
 * ## Feed
 *
 * - `GET  /feed/posts` - paginated listing (public)
 * - `POST /feed/post` - create post (guarded, multipart)
 * - `GET  /feed/post/{post_id}` - fetch single post (public)
 * - `PUT  /feed/post/{post_id}` - update post (guarded, multipart)
 * - `DELETE /feed/post/{post_id}` - delete post (guarded)
 * - `GET  /feed/events` - SSE stream of feed events (public)
 *
 * ## Auth
 *
 * - `PUT   /auth/signup` - user registration (public)
 * - `POST  /auth/login` - token issuance (public)
 * - `GET   /auth/status` - own status (guarded)
 * - `PATCH /auth/status` - set own status (guarded)
 *
 * ## Static
 *
 * Stored images are served at `/images`. Unknown routes fall back to 404.
 *
 * # Guarding
 *
 * The authorization guard is applied per method router, so a guarded and a
 * public method can share a path (`GET /feed/post/{post_id}` is public
 * while `PUT`/`DELETE` on the same path are not). The service is fully
 * CORS-open, matching its public-API posture.
 */

use std::path::Path;

use axum::{middleware, routing, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::auth::handlers::{get_status, login, signup, update_status};
use crate::feed::handlers::{create_post, delete_post, get_post, list_posts, update_post};
use crate::middleware::auth::auth_guard;
use crate::realtime::subscription::handle_feed_subscription;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState, images_dir: &Path) -> Router<()> {
    let guard = middleware::from_fn_with_state(state.clone(), auth_guard);

    let router = Router::new()
        // Feed
        .route("/feed/posts", routing::get(list_posts))
        .route(
            "/feed/post",
            routing::post(create_post).route_layer(guard.clone()),
        )
        .route(
            "/feed/post/{post_id}",
            routing::get(get_post).merge(
                routing::put(update_post)
                    .delete(delete_post)
                    .route_layer(guard.clone()),
            ),
        )
        .route("/feed/events", routing::get(handle_feed_subscription))
        // Auth
        .route("/auth/signup", routing::put(signup))
        .route("/auth/login", routing::post(login))
        .route(
            "/auth/status",
            routing::get(get_status)
                .patch(update_status)
                .route_layer(guard),
        );

    // Stored images are public static files
    let router = router.nest_service("/images", ServeDir::new(images_dir));

    router
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(CorsLayer::permissive())
        .with_state(state)
}
