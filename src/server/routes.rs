//! Router configuration for the conversion service.
//!
//! This module defines the HTTP routes and applies middleware for
//! authentication, body limits and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! POST /         - HTML to PDF conversion (Basic auth)
//! GET  /health   - Health check (public)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use html2pdf_server::convert::{ConversionService, WkhtmltopdfRenderer};
//! use html2pdf_server::server::{auth::Credentials, create_router, RouterConfig};
//!
//! let service = ConversionService::new(WkhtmltopdfRenderer::default());
//! let config = RouterConfig::new(Credentials::new("admin", "s3cret"))
//!     .with_max_body_size(4 * 1024 * 1024);
//!
//! let router = create_router(service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::auth::{auth_middleware, BasicAuth, Credentials, DEFAULT_REALM};
use super::handlers::{convert_handler, health_handler, AppState};
use crate::convert::{ConversionService, PdfRenderer};

/// Default maximum request body size (10 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Credentials required on the conversion endpoint
    pub credentials: Credentials,

    /// Realm announced in authentication challenges
    pub realm: String,

    /// Maximum accepted request body in bytes
    pub max_body_size: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration requiring the given credentials.
    ///
    /// By default:
    /// - The realm is "html2pdf"
    /// - Bodies up to 10 MiB are accepted
    /// - Tracing is enabled
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            realm: DEFAULT_REALM.to_string(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            enable_tracing: true,
        }
    }

    /// Set the authentication realm.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Set the maximum request body size in bytes.
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// The conversion route is wrapped, from the outside in, by the Basic auth
/// middleware and the body size limit, so unauthenticated requests are
/// rejected before their body is read.
pub fn create_router<R>(conversion_service: ConversionService<R>, config: RouterConfig) -> Router
where
    R: PdfRenderer + 'static,
{
    let app_state = AppState::new(conversion_service);
    let auth = BasicAuth::with_realm(config.credentials.clone(), config.realm.clone());

    let protected_routes = Router::new()
        .route("/", post(convert_handler::<R>))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    let public_routes = Router::new().route("/health", get(health_handler));

    let router = Router::new()
        .merge(protected_routes)
        .merge(public_routes);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

// =============================================================================
// Tests
// =============================================================================
