//! Authentication integration tests.
//!
//! Tests verify:
//! - Requests without valid credentials get 401 regardless of body
//! - The 401 carries a Basic challenge and no hint about which field failed
//! - Rejected requests never reach the renderer
//! - The health endpoint stays public

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use html2pdf_server::server::Credentials;

use super::test_utils::{
    authed_post, json_body, router_with, MockRenderer, TEST_PASSWORD, TEST_USERNAME,
};

const VALID_BODY: &str = r#"{"html": "<h1>Hi</h1>", "title": "Greeting"}"#;

fn post_with_authorization(value: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = value {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_missing_credentials_rejected() {
    let renderer = MockRenderer::new();
    let router = router_with(renderer.clone());

    let response = router
        .oneshot(post_with_authorization(None, VALID_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(renderer.call_count(), 0);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let renderer = MockRenderer::new();
    let router = router_with(renderer.clone());

    let header = Credentials::new(TEST_USERNAME, "wrong-password").to_header();
    let response = router
        .oneshot(post_with_authorization(Some(&header), VALID_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(renderer.call_count(), 0);
}

#[tokio::test]
async fn test_wrong_username_rejected() {
    let router = router_with(MockRenderer::new());

    let header = Credentials::new("someone-else", TEST_PASSWORD).to_header();
    let response = router
        .oneshot(post_with_authorization(Some(&header), VALID_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejection_does_not_reveal_failing_field() {
    let wrong_user = Credentials::new("someone-else", TEST_PASSWORD).to_header();
    let wrong_pass = Credentials::new(TEST_USERNAME, "wrong-password").to_header();

    let first = router_with(MockRenderer::new())
        .oneshot(post_with_authorization(Some(&wrong_user), VALID_BODY))
        .await
        .unwrap();
    let second = router_with(MockRenderer::new())
        .oneshot(post_with_authorization(Some(&wrong_pass), VALID_BODY))
        .await
        .unwrap();

    assert_eq!(first.status(), second.status());
    assert_eq!(json_body(first).await, json_body(second).await);
}

#[tokio::test]
async fn test_non_basic_scheme_rejected() {
    let router = router_with(MockRenderer::new());

    let response = router
        .oneshot(post_with_authorization(
            Some("Bearer some-api-token"),
            VALID_BODY,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_undecodable_credentials_rejected() {
    let router = router_with(MockRenderer::new());

    let response = router
        .oneshot(post_with_authorization(Some("Basic %%%%"), VALID_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthorized_regardless_of_body() {
    for body in ["", "not json", "{}", VALID_BODY] {
        let router = router_with(MockRenderer::new());
        let response = router
            .oneshot(post_with_authorization(None, body))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "body: {:?}",
            body
        );
    }
}

#[tokio::test]
async fn test_challenge_header_and_body() {
    let router = router_with(MockRenderer::new());

    let response = router
        .oneshot(post_with_authorization(None, VALID_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(challenge.starts_with("Basic realm=\"html2pdf\""));

    let json = json_body(response).await;
    assert_eq!(json["error"], "Unauthorized");
}

// =============================================================================
// Acceptance
// =============================================================================

#[tokio::test]
async fn test_valid_credentials_accepted() {
    let renderer = MockRenderer::new();
    let router = router_with(renderer.clone());

    let response = router.oneshot(authed_post(VALID_BODY)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(renderer.call_count(), 1);
}

#[tokio::test]
async fn test_health_is_public() {
    let router = router_with(MockRenderer::new());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
