//! HTTP Basic authentication for the conversion endpoint.
//!
//! Every conversion request must carry an `Authorization` header using the
//! Basic scheme:
//!
//! ```text
//! Authorization: Basic base64("{username}:{password}")
//! ```
//!
//! The presented pair is compared against the credentials configured at
//! startup. Both fields are compared in constant time and the results are
//! combined without short-circuiting, so a rejection does not reveal which
//! field was wrong.
//!
//! # Example
//!
//! ```rust
//! use html2pdf_server::server::auth::{BasicAuth, Credentials};
//!
//! let auth = BasicAuth::new(Credentials::new("admin", "s3cret"));
//!
//! // "admin:s3cret"
//! assert!(auth.verify_header("Basic YWRtaW46czNjcmV0").is_ok());
//! assert!(auth.verify_header("Basic YWRtaW46d3Jvbmc=").is_err());
//! ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

/// Default realm announced in the `WWW-Authenticate` challenge.
pub const DEFAULT_REALM: &str = "html2pdf";

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
///
/// All variants produce the same client-facing response; the distinction is
/// only kept for server-side logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent
    MissingCredentials,

    /// The header is not a decodable Basic credential
    MalformedHeader,

    /// Username or password does not match
    InvalidCredentials,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Missing Authorization header"),
            AuthError::MalformedHeader => write!(f, "Malformed Basic Authorization header"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse the value of an `Authorization` header using the Basic scheme.
    pub fn from_header(value: &str) -> Result<Self, AuthError> {
        let (scheme, encoded) = value
            .trim()
            .split_once(' ')
            .ok_or(AuthError::MalformedHeader)?;

        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::MalformedHeader);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::MalformedHeader)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;

        let (username, password) = decoded.split_once(':').ok_or(AuthError::MalformedHeader)?;
        Ok(Self::new(username, password))
    }

    /// Encode as an `Authorization` header value.
    pub fn to_header(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Basic Authenticator
// =============================================================================

/// Verifies presented credentials against the configured pair.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    credentials: Credentials,
    realm: String,
}

impl BasicAuth {
    /// Create an authenticator using the default realm.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_realm(credentials, DEFAULT_REALM)
    }

    /// Create an authenticator announcing a custom realm.
    pub fn with_realm(credentials: Credentials, realm: impl Into<String>) -> Self {
        Self {
            credentials,
            realm: realm.into(),
        }
    }

    /// The realm sent in authentication challenges.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Check a username/password pair against the configured credentials.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password.as_bytes());
        (username_ok & password_ok).into()
    }

    /// Verify the value of an `Authorization` header.
    pub fn verify_header(&self, value: &str) -> Result<(), AuthError> {
        let presented = Credentials::from_header(value)?;
        if self.verify(&presented.username, &presented.password) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Build the 401 response for a failed authentication.
    pub fn challenge(&self, error: AuthError) -> Response {
        match error {
            AuthError::InvalidCredentials => {
                warn!(status = 401, "Authentication failed: {}", error)
            }
            _ => debug!(status = 401, "Authentication failed: {}", error),
        }

        let challenge = format!("Basic realm=\"{}\", charset=\"UTF-8\"", self.realm);
        let mut response = (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();

        if let Ok(value) = HeaderValue::from_str(&challenge) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, value);
        }

        response
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware that rejects requests without valid Basic credentials.
///
/// Runs before the handler extracts the body, so unauthenticated requests are
/// never parsed or converted.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::post};
/// use html2pdf_server::server::auth::{BasicAuth, Credentials, auth_middleware};
///
/// let auth = BasicAuth::new(Credentials::new("admin", "s3cret"));
/// let app = Router::new()
///     .route("/", post(convert_handler))
///     .layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<BasicAuth>,
    request: Request,
    next: Next,
) -> Response {
    let result = match request.headers().get(header::AUTHORIZATION) {
        None => Err(AuthError::MissingCredentials),
        Some(value) => value
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)
            .and_then(|value| auth.verify_header(value)),
    };

    match result {
        Ok(()) => next.run(request).await,
        Err(error) => auth.challenge(error),
    }
}

// =============================================================================
// Tests
// =============================================================================
