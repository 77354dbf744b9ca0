//! Test utilities for integration tests.
//!
//! This module provides mock renderers and helpers for building requests
//! against the router and decoding its responses.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use http_body_util::BodyExt;

use html2pdf_server::convert::{ConversionService, PdfRenderer, RenderOptions};
use html2pdf_server::error::ConvertError;
use html2pdf_server::server::{create_router, Credentials, RouterConfig};

pub const TEST_USERNAME: &str = "converter";
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

// =============================================================================
// Mock Renderers
// =============================================================================

/// A renderer that produces a tiny, deterministic PDF-shaped document.
///
/// The title is written into an Info dictionary so tests can check which
/// title reached the renderer. Every call is counted.
#[derive(Clone, Default)]
pub struct MockRenderer {
    calls: Arc<AtomicUsize>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfRenderer for MockRenderer {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Bytes, ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from(mock_pdf(html, &options.title)))
    }
}

/// Build the document [`MockRenderer`] returns.
pub fn mock_pdf(html: &str, title: &str) -> Vec<u8> {
    format!(
        "%PDF-1.4\n1 0 obj\n<< /Title ({}) >>\nendobj\n2 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n%%EOF\n",
        title,
        html.len(),
        html
    )
    .into_bytes()
}

/// A renderer that always fails the way a broken wkhtmltopdf install does.
pub struct FailingRenderer;

#[async_trait]
impl PdfRenderer for FailingRenderer {
    async fn render(&self, _: &str, _: &RenderOptions) -> Result<Bytes, ConvertError> {
        Err(ConvertError::Failed {
            status: 1,
            stderr: "QXcbConnection: Could not connect to display /srv/secret/path".to_string(),
        })
    }
}

/// A renderer that returns something other than a PDF.
pub struct GarbageRenderer;

#[async_trait]
impl PdfRenderer for GarbageRenderer {
    async fn render(&self, html: &str, _: &RenderOptions) -> Result<Bytes, ConvertError> {
        Ok(Bytes::from(html.to_string()))
    }
}

/// A renderer that never finishes within a test's timeout.
pub struct SlowRenderer;

#[async_trait]
impl PdfRenderer for SlowRenderer {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Bytes, ConvertError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Bytes::from(mock_pdf(html, &options.title)))
    }
}

// =============================================================================
// Router and Request Helpers
// =============================================================================

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_USERNAME, TEST_PASSWORD)
}

pub fn test_router_config() -> RouterConfig {
    RouterConfig::new(test_credentials()).with_tracing(false)
}

/// Router backed by the given renderer with default limits.
pub fn router_with<R: PdfRenderer + 'static>(renderer: R) -> Router {
    create_router(ConversionService::new(renderer), test_router_config())
}

/// `Authorization` header value carrying the test credentials.
pub fn auth_header() -> String {
    test_credentials().to_header()
}

/// POST `/` with valid credentials and the given body.
pub fn authed_post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::AUTHORIZATION, auth_header())
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// POST `/` with valid credentials and no body at all.
pub fn authed_post_empty() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::AUTHORIZATION, auth_header())
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Decode the `pdf` field of a successful conversion response.
pub async fn decoded_pdf(response: Response<Body>) -> Vec<u8> {
    let json = json_body(response).await;
    let encoded = json["pdf"].as_str().expect("pdf field is a string");
    STANDARD.decode(encoded).expect("pdf field is valid base64")
}

/// Check for the `%PDF-` file signature.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

/// Extract the `/Title (...)` value from a document produced by [`MockRenderer`].
pub fn mock_pdf_title(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data);
    let start = text.find("/Title (")? + "/Title (".len();
    let end = text[start..].find(')')? + start;
    Some(text[start..end].to_string())
}
