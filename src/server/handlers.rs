//! HTTP request handlers for the conversion API.
//!
//! # Endpoints
//!
//! - `POST /` - Convert an HTML document to a base64-encoded PDF
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::convert::{ConversionJob, ConversionService, PdfRenderer, DEFAULT_TITLE};
use crate::error::{ConvertError, RequestError};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the conversion service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<R: PdfRenderer> {
    /// The service that renders conversion jobs
    pub conversion_service: Arc<ConversionService<R>>,
}

impl<R: PdfRenderer> AppState<R> {
    /// Create a new application state with the given conversion service.
    pub fn new(conversion_service: ConversionService<R>) -> Self {
        Self {
            conversion_service: Arc::new(conversion_service),
        }
    }
}

impl<R: PdfRenderer> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            conversion_service: Arc::clone(&self.conversion_service),
        }
    }
}

// =============================================================================
// Request Body
// =============================================================================

/// JSON body of a conversion request.
///
/// ```json
/// { "html": "<h1>Hi</h1>", "title": "Greeting" }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Full HTML document (required, `null` counts as missing)
    pub html: Option<String>,

    /// Document title (defaults to "Default Title")
    pub title: Option<String>,
}

impl ConversionRequest {
    /// Parse a raw request body.
    ///
    /// Anything other than a JSON object, including an empty body, is
    /// reported as [`RequestError::NoJsonData`]. A missing or `null` `html`
    /// is reported as [`RequestError::MissingHtml`] before any other field
    /// is looked at. Scalar titles (numbers, booleans) are used as text.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(RequestError::NoJsonData);
        }

        let mut object: Map<String, Value> =
            serde_json::from_slice(body).map_err(|_| RequestError::NoJsonData)?;

        let html = match object.remove("html") {
            None | Some(Value::Null) => return Err(RequestError::MissingHtml),
            Some(Value::String(html)) => html,
            Some(other) => {
                return Err(RequestError::InvalidField(format!(
                    "'html' must be a string, got {}",
                    json_type(&other)
                )))
            }
        };

        let title = match object.remove("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(title)) => Some(title),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other) => {
                return Err(RequestError::InvalidField(format!(
                    "'title' must be a string, got {}",
                    json_type(&other)
                )))
            }
        };

        Ok(Self {
            html: Some(html),
            title,
        })
    }

    /// Validate the request into a conversion job.
    pub fn into_job(self) -> Result<ConversionJob, RequestError> {
        let html = self.html.ok_or(RequestError::MissingHtml)?;
        let title = self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Ok(ConversionJob::with_title(html, title))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Successful conversion response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResponse {
    /// Base64-encoded PDF document
    pub pdf: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Conversion
// =============================================================================

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let message = self.to_string();

        warn!(status = status.as_u16(), "Client error: {}", message);

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        // Renderer output can echo document content or host paths, so it is
        // only logged.
        let (status, error_type, message) = if self.is_timeout() {
            (
                StatusCode::GATEWAY_TIMEOUT,
                "convert_timeout",
                "PDF conversion timed out",
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "convert_failed",
                "PDF conversion failed",
            )
        };

        error!(
            error_type = error_type,
            status = status.as_u16(),
            "Server error: {}",
            self
        );

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Error type for the conversion handler.
#[derive(Debug)]
pub enum HandlerError {
    /// The body failed validation
    Request(RequestError),

    /// The renderer failed
    Convert(ConvertError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::Request(err) => err.into_response(),
            HandlerError::Convert(err) => err.into_response(),
        }
    }
}

impl From<RequestError> for HandlerError {
    fn from(err: RequestError) -> Self {
        HandlerError::Request(err)
    }
}

impl From<ConvertError> for HandlerError {
    fn from(err: ConvertError) -> Self {
        HandlerError::Convert(err)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle conversion requests.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// - `html`: HTML document to render (required)
/// - `title`: PDF title metadata (optional, default "Default Title")
///
/// # Response
///
/// - `200 OK`: `{"pdf": "<base64>"}`
/// - `400 Bad Request`: Body missing, not a JSON object, or without `html`
/// - `500 Internal Server Error`: Renderer failed
/// - `504 Gateway Timeout`: Renderer did not finish in time
pub async fn convert_handler<R: PdfRenderer + 'static>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<Json<ConversionResponse>, HandlerError> {
    let job = ConversionRequest::from_body(&body)?.into_job()?;

    let pdf = state.conversion_service.convert_to_base64(&job).await?;

    Ok(Json(ConversionResponse { pdf }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
