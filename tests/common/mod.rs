//! Shared fixtures for the integration suite.
//!
//! Builds the real router over the in-memory store and a throwaway image
//! directory, and provides request helpers so tests read as scenarios. No
//! external services are involved.

// Each test binary compiles its own copy; not every helper is used by every binary.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use uuid::Uuid;

use feedcast::auth::tokens::TokenManager;
use feedcast::images::DiskImageStore;
use feedcast::routes::router::create_router;
use feedcast::server::state::AppState;
use feedcast::store::MemoryFeedStore;

pub const BOUNDARY: &str = "feedcast-test-boundary";

/// A running test application: the router, its state for out-of-band
/// assertions, and the image directory it writes to.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub images_dir: PathBuf,
}

pub async fn test_app() -> TestApp {
    let images_dir = std::env::temp_dir().join(format!("feedcast-it-{}", Uuid::new_v4()));
    let images = DiskImageStore::new(&images_dir)
        .await
        .expect("create test image dir");
    let (feed_broadcast, _) = tokio::sync::broadcast::channel(64);

    let state = AppState {
        store: Arc::new(MemoryFeedStore::new()),
        images: Arc::new(images),
        feed_broadcast,
        tokens: TokenManager::new("integration-secret"),
    };

    TestApp {
        router: create_router(state.clone(), &images_dir),
        state,
        images_dir,
    }
}

impl TestApp {
    /// Send a request and return status plus parsed JSON body (Null when
    /// the body is empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router never errors");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };
        (status, json)
    }

    /// Send a request and return only the status, ignoring the body. For
    /// non-JSON responses like static files.
    pub async fn status_of(&self, request: Request<Body>) -> StatusCode {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never errors")
            .status()
    }

    pub async fn signup(&self, email: &str, name: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "email": email, "name": name, "password": password });
        self.send(json_request("PUT", "/auth/signup", &body)).await
    }

    /// Sign up and log in, returning (token, user id).
    pub async fn signup_and_login(&self, email: &str, name: &str, password: &str) -> (String, Uuid) {
        let (status, _) = self.signup(email, name, password).await;
        assert_eq!(status, StatusCode::CREATED);

        let body = serde_json::json!({ "email": email, "password": password });
        let (status, json) = self.send(json_request("POST", "/auth/login", &body)).await;
        assert_eq!(status, StatusCode::OK);

        let token = json["token"].as_str().expect("login returns token").to_string();
        let user_id = json["userId"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("login returns userId");
        (token, user_id)
    }

    pub async fn create_post(
        &self,
        token: &str,
        title: &str,
        content: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = multipart_body(&[("title", title), ("content", content)], Some(b"fake png"));
        let request = Request::builder()
            .method("POST")
            .uri("/feed/post")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart body with text fields and an optional PNG file part
/// named `image`.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"pic.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Count the files currently in the image directory.
pub async fn image_count(dir: &std::path::Path) -> usize {
    let mut entries = tokio::fs::read_dir(dir).await.expect("read image dir");
    let mut count = 0;
    while entries.next_entry().await.expect("dir entry").is_some() {
        count += 1;
    }
    count
}

/// Wait for detached image releases to land.
pub async fn wait_for_image_count(dir: &std::path::Path, expected: usize) {
    for _ in 0..200 {
        if image_count(dir).await == expected {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("image directory never reached {expected} entries");
}
