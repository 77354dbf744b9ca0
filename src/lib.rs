//! # html2pdf-server
//!
//! A small HTTP service that renders HTML documents to PDF.
//!
//! Clients `POST` a JSON document `{"html": "...", "title": "..."}` with HTTP
//! Basic credentials and receive `{"pdf": "<base64>"}` in return.
//!
//! ## Request Lifecycle
//!
//! ```text
//! Unauthenticated ──401──▶ rejected
//!        │
//!        ▼
//!   Validating ─────400──▶ rejected
//!        │
//!        ▼
//!   Converting ──500/504─▶ rejected
//!        │
//!        ▼
//!   Responded (200, base64 PDF)
//! ```
//!
//! ## Architecture
//!
//! - [`server`] - Axum router, Basic auth middleware and handlers
//! - [`convert`] - Renderer trait, wkhtmltopdf renderer and conversion service
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Validation and conversion error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use html2pdf_server::{create_router, ConversionService, Credentials, RouterConfig, WkhtmltopdfRenderer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = ConversionService::new(WkhtmltopdfRenderer::default());
//!     let router = create_router(service, RouterConfig::new(Credentials::new("admin", "s3cret")));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use convert::{
    encode_pdf, is_pdf, ConversionJob, ConversionService, PdfRenderer, RenderOptions,
    WkhtmltopdfRenderer, DEFAULT_CONVERT_TIMEOUT, DEFAULT_TITLE, PDF_SIGNATURE,
};
pub use error::{ConvertError, RequestError};
pub use server::{
    auth_middleware, convert_handler, create_router, health_handler, AppState, AuthError,
    BasicAuth, ConversionRequest, ConversionResponse, Credentials, ErrorResponse, HandlerError,
    HealthResponse, RouterConfig,
};
