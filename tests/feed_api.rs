//! Feed API integration tests
//!
//! The full mutation-and-notification scenario plus listing and guard
//! behavior, driven through the real router with a broadcast listener
//! attached.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{
    authed_request, bare_request, multipart_body, test_app, wait_for_image_count, BOUNDARY,
};
use feedcast::realtime::broadcast::FeedEvent;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn test_full_feed_scenario() {
    let app = test_app().await;

    // User A signs up and logs in
    let (token_a, user_a) = app.signup_and_login("a@x.com", "A", "secret").await;

    // A connected listener observes the feed
    let mut events = app.state.feed_broadcast.subscribe();

    // A creates a post
    let (status, json) = app.create_post(&token_a, "Hello", "World").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Post created successfully!");
    assert_eq!(json["post"]["title"], "Hello");
    assert_eq!(json["post"]["creator"]["id"], user_a.to_string());
    assert_eq!(json["post"]["creator"]["name"], "A");
    let post_id = json["post"]["id"].as_str().unwrap().to_string();
    let image_url = json["post"]["imageUrl"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("images/"));

    // The create broadcast fired, after persistence
    match events.try_recv().unwrap() {
        FeedEvent::Create { post } => assert_eq!(post.id.to_string(), post_id),
        other => panic!("expected create event, got {other:?}"),
    }

    // The owner-set gained exactly the new post id
    let refs = app.state.store.post_refs(user_a).await.unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].to_string(), post_id);

    // The stored image is served statically
    let status = app
        .status_of(bare_request("GET", &format!("/{image_url}")))
        .await;
    assert_eq!(status, StatusCode::OK);

    // User B cannot delete A's post
    let (token_b, _) = app.signup_and_login("b@x.com", "B", "secret").await;
    let (status, json) = app
        .send(authed_request(
            "DELETE",
            &format!("/feed/post/{post_id}"),
            &token_b,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Not authorized!");
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    // The post is untouched and publicly readable
    let (status, json) = app
        .send(bare_request("GET", &format!("/feed/post/{post_id}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["post"]["title"], "Hello");

    // A deletes their own post
    let (status, json) = app
        .send(authed_request(
            "DELETE",
            &format!("/feed/post/{post_id}"),
            &token_a,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "The post is deleted!");

    // The delete broadcast carries the post id
    match events.try_recv().unwrap() {
        FeedEvent::Delete { post } => assert_eq!(post.to_string(), post_id),
        other => panic!("expected delete event, got {other:?}"),
    }

    // The owner-set emptied and the image was released
    assert!(app.state.store.post_refs(user_a).await.unwrap().is_empty());
    wait_for_image_count(&app.images_dir, 0).await;

    // The post is gone
    let (status, _) = app
        .send(bare_request("GET", &format!("/feed/post/{post_id}")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = test_app().await;

    let body = multipart_body(&[("title", "Hello"), ("content", "World")], Some(b"png"));
    let request = Request::builder()
        .method("POST")
        .uri("/feed/post")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.state.store.count_posts().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_validation_failure_reports_fields() {
    let app = test_app().await;
    let (token, _) = app.signup_and_login("a@x.com", "A", "secret").await;

    // Blank title and no image part at all
    let body = multipart_body(&[("title", "  "), ("content", "World")], None);
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
    let (status, json) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<&str> = json["data"]
        .as_array()
        .expect("field detail array")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"image"));

    assert_eq!(app.state.store.count_posts().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_replaces_fields_and_broadcasts() {
    let app = test_app().await;
    let (token, _) = app.signup_and_login("a@x.com", "A", "secret").await;

    let (_, json) = app.create_post(&token, "Hello", "World").await;
    let post_id = json["post"]["id"].as_str().unwrap().to_string();
    let image_url = json["post"]["imageUrl"].as_str().unwrap().to_string();

    let mut events = app.state.feed_broadcast.subscribe();

    // Keep the existing image by passing its reference through as text
    let body = multipart_body(
        &[
            ("title", "Hello again"),
            ("content", "Updated"),
            ("image", &image_url),
        ],
        None,
    );
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/feed/post/{post_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, json) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Post updated");
    assert_eq!(json["post"]["title"], "Hello again");
    assert_eq!(json["post"]["imageUrl"], image_url);

    match events.try_recv().unwrap() {
        FeedEvent::Update { post } => assert_eq!(post.title, "Hello again"),
        other => panic!("expected update event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_missing_post_is_404_without_broadcast() {
    let app = test_app().await;
    let (token, _) = app.signup_and_login("a@x.com", "A", "secret").await;
    let mut events = app.state.feed_broadcast.subscribe();

    let (status, json) = app
        .send(authed_request(
            "DELETE",
            &format!("/feed/post/{}", uuid::Uuid::new_v4()),
            &token,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Could not find post!");
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_listing_pages_through_the_feed() {
    let app = test_app().await;
    let (token, _) = app.signup_and_login("a@x.com", "A", "secret").await;

    for i in 0..5 {
        let (status, _) = app
            .create_post(&token, &format!("post-{i}"), "content")
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let mut sizes = Vec::new();
    for page in 1..=3 {
        let (status, json) = app
            .send(bare_request("GET", &format!("/feed/posts?page={page}")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalItems"], 5);
        sizes.push(json["posts"].as_array().unwrap().len());
    }
    assert_eq!(sizes, vec![2, 2, 1]);

    // Newest first: the last created post leads the first page
    let (_, json) = app.send(bare_request("GET", "/feed/posts")).await;
    assert_eq!(json["posts"][0]["title"], "post-4");
}
