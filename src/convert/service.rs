//! Conversion service for orchestrating PDF rendering.
//!
//! The ConversionService is the entry point for validated conversion jobs:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   ConversionService                      │
//! │  1. Run renderer under timeout                           │
//! │  2. Check the output is a PDF                            │
//! │  3. Base64 encode for the JSON response                  │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//!                            ▼
//!                  ┌───────────────────┐
//!                  │    PdfRenderer    │
//!                  └───────────────────┘
//! ```

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::debug;

use crate::error::ConvertError;

use super::renderer::{is_pdf, PdfRenderer, RenderOptions, DEFAULT_TITLE};

/// Default upper bound for a single conversion.
pub const DEFAULT_CONVERT_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// Conversion Job
// =============================================================================

/// A validated HTML to PDF job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Full HTML document markup
    pub html: String,

    /// Document title passed to the renderer
    pub title: String,
}

impl ConversionJob {
    /// Create a job with the default title.
    pub fn new(html: impl Into<String>) -> Self {
        Self::with_title(html, DEFAULT_TITLE)
    }

    /// Create a job with an explicit title.
    pub fn with_title(html: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            title: title.into(),
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::with_title(self.title.clone())
    }
}

/// Encode PDF bytes for transport inside a JSON document.
pub fn encode_pdf(pdf: &[u8]) -> String {
    STANDARD.encode(pdf)
}

// =============================================================================
// Conversion Service
// =============================================================================

/// Service that turns conversion jobs into PDF documents.
///
/// # Type Parameters
///
/// * `R` - The rendering engine (e.g., [`super::WkhtmltopdfRenderer`])
pub struct ConversionService<R: PdfRenderer> {
    renderer: R,
    timeout: Duration,
}

impl<R: PdfRenderer> ConversionService<R> {
    /// Create a service with the default conversion timeout.
    pub fn new(renderer: R) -> Self {
        Self::with_timeout(renderer, DEFAULT_CONVERT_TIMEOUT)
    }

    /// Create a service with a custom conversion timeout.
    pub fn with_timeout(renderer: R, timeout: Duration) -> Self {
        Self { renderer, timeout }
    }

    /// The timeout applied to each conversion.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render a job to PDF bytes.
    ///
    /// Fails with [`ConvertError::Timeout`] if the renderer does not finish in
    /// time; the pending render is dropped, which kills a renderer process.
    pub async fn convert(&self, job: &ConversionJob) -> Result<Bytes, ConvertError> {
        let options = job.render_options();

        let pdf = match tokio::time::timeout(self.timeout, self.renderer.render(&job.html, &options))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(ConvertError::Timeout {
                    timeout: self.timeout,
                })
            }
        };

        if pdf.is_empty() {
            return Err(ConvertError::EmptyOutput);
        }
        if !is_pdf(&pdf) {
            return Err(ConvertError::InvalidPdf);
        }

        debug!(
            title = %job.title,
            html_bytes = job.html.len(),
            pdf_bytes = pdf.len(),
            "Rendered PDF"
        );

        Ok(pdf)
    }

    /// Render a job and return the PDF as a base64 string.
    pub async fn convert_to_base64(&self, job: &ConversionJob) -> Result<String, ConvertError> {
        let pdf = self.convert(job).await?;
        Ok(encode_pdf(&pdf))
    }
}

// =============================================================================
// Tests
// =============================================================================
