/// Integration tests for the listing routes' validation paths
///
/// These run the real router end-to-end over requests that must be decided
/// before the store is reached: missing owner identifier, over-cap image
/// batches, malformed field values, and the cleanup of uploads written for a
/// request that was then rejected.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{listing_fields, multipart_body, multipart_content_type, TestContext};
use tower::Service as _;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create without an owner identifier is rejected and persists nothing
#[tokio::test]
async fn test_create_without_user_id_is_rejected() {
    let ctx = TestContext::new().unwrap();

    let body = multipart_body(&listing_fields(), &[("kitchen.jpg", &b"fake image bytes"[..])]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/properties")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("userId"));

    // The rejected request's upload must not survive.
    assert_eq!(ctx.stored_files(), 0);
}

/// A sixth image fails the request and removes the first five again
#[tokio::test]
async fn test_create_with_six_images_is_rejected() {
    let ctx = TestContext::new().unwrap();

    let mut fields = listing_fields();
    fields.push(("userId", "auth0|user-42"));

    let files: Vec<(&str, &[u8])> = vec![
        ("a.jpg", &b"a"[..]),
        ("b.jpg", &b"b"[..]),
        ("c.jpg", &b"c"[..]),
        ("d.jpg", &b"d"[..]),
        ("e.jpg", &b"e"[..]),
        ("f.jpg", &b"f"[..]),
    ];
    let body = multipart_body(&fields, &files);

    let request = Request::builder()
        .method("POST")
        .uri("/api/properties")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");

    assert_eq!(ctx.stored_files(), 0);
}

/// A non-numeric price is a field-level validation failure
#[tokio::test]
async fn test_create_with_bad_price_is_rejected() {
    let ctx = TestContext::new().unwrap();

    let mut fields: Vec<(&str, &str)> = listing_fields()
        .into_iter()
        .map(|(name, value)| if name == "price" { (name, "cheap") } else { (name, value) })
        .collect();
    fields.push(("userId", "auth0|user-42"));

    let body = multipart_body(&fields, &[]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/properties")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "price");
}

/// Malformed keepImages on update is rejected and the fresh upload removed
#[tokio::test]
async fn test_update_with_malformed_keep_images_is_rejected() {
    let ctx = TestContext::new().unwrap();

    let body = multipart_body(
        &[("keepImages", "not a json array")],
        &[("new.jpg", &b"fresh bytes"[..])],
    );

    let request = Request::builder()
        .method("PUT")
        .uri("/api/properties/550e8400-e29b-41d4-a716-446655440000")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("keepImages"));

    assert_eq!(ctx.stored_files(), 0);
}

/// Health check succeeds even when the store is unreachable
#[tokio::test]
async fn test_health_degrades_without_database() {
    let ctx = TestContext::new().unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "disconnected");
}

/// Errors always carry the machine-readable `error` marker in the body
#[tokio::test]
async fn test_error_bodies_carry_error_field() {
    let ctx = TestContext::new().unwrap();

    let body = multipart_body(&[], &[]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/properties")
        .header("content-type", multipart_content_type())
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json["message"].is_string());
}
