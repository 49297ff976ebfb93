/**
 * Feed Subscription Handler
 *
 * Server-Sent Events stream for GET /feed/events. Every feed mutation is
 * delivered to all connected clients as an SSE message named `posts`.
 *
 * # Connection Management
 *
 * - Connections are kept alive with the SSE keep-alive mechanism; axum
 *   injects comment lines so no empty data events are needed
 * - A subscriber that lags behind the channel capacity has the skipped
 *   events logged and keeps receiving from the current position; the
 *   connection is not dropped
 * - The stream ends only when the broadcast channel itself closes
 */

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;

use crate::realtime::broadcast::FeedEventBroadcast;

/// Handle a live feed subscription (GET /feed/events).
pub async fn handle_feed_subscription(
    State(broadcast_tx): State<FeedEventBroadcast>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    tracing::info!("[Feed] Subscription opened");

    let broadcast_rx = broadcast_tx.subscribe();

    let stream = stream::unfold(broadcast_rx, move |mut rx| async move {
        // Loop until there is an event worth forwarding
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Feed] Failed to serialize event: {e}");
                            continue;
                        }
                    };

                    let sse_event = Event::default().event("posts").data(data);
                    return Some((Ok(sse_event), rx));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Feed] Subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::info!("[Feed] Broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
