//! HTML to PDF renderers.
//!
//! The rendering engine is an external collaborator. [`PdfRenderer`] is the
//! seam the rest of the crate talks to; [`WkhtmltopdfRenderer`] is the
//! production implementation and drives the `wkhtmltopdf` binary, piping the
//! HTML document through stdin and collecting the PDF from stdout so nothing
//! touches the filesystem.
//!
//! # Example
//!
//! ```ignore
//! use html2pdf_server::convert::{PdfRenderer, RenderOptions, WkhtmltopdfRenderer};
//!
//! let renderer = WkhtmltopdfRenderer::default();
//! let pdf = renderer
//!     .render("<h1>Hi</h1>", &RenderOptions::with_title("Greeting"))
//!     .await?;
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::ConvertError;

/// Title used when a request does not provide one.
pub const DEFAULT_TITLE: &str = "Default Title";

/// Default name of the wkhtmltopdf binary, resolved through `PATH`.
pub const DEFAULT_WKHTMLTOPDF_BINARY: &str = "wkhtmltopdf";

/// Every PDF document starts with this signature.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Check whether a byte sequence starts with the PDF file signature.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_SIGNATURE)
}

// =============================================================================
// Render Options
// =============================================================================

/// Options forwarded to the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Document title embedded in the PDF metadata
    pub title: String,
}

impl RenderOptions {
    /// Create options with the given document title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }
}

// =============================================================================
// PdfRenderer Trait
// =============================================================================

/// Trait for engines that turn an HTML document into PDF bytes.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Render `html` to an in-memory PDF document.
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Bytes, ConvertError>;
}

// =============================================================================
// wkhtmltopdf
// =============================================================================

/// Renderer backed by the `wkhtmltopdf` command line tool.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    binary: PathBuf,
}

impl WkhtmltopdfRenderer {
    /// Create a renderer that invokes the given binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Path of the binary this renderer invokes.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Command line arguments for a render with the given options.
    ///
    /// The two trailing `-` read the document from stdin and write the PDF
    /// to stdout.
    pub fn args(&self, options: &RenderOptions) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "--title".to_string(),
            options.title.clone(),
            "-".to_string(),
            "-".to_string(),
        ]
    }
}

impl Default for WkhtmltopdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WKHTMLTOPDF_BINARY)
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<Bytes, ConvertError> {
        let mut child = Command::new(&self.binary)
            .args(self.args(options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConvertError::Spawn(format!("{}: {}", self.binary.display(), e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConvertError::Io("renderer stdin is not piped".to_string()))?;

        // Feed stdin while draining stdout so neither pipe can fill up and stall.
        let document = html.as_bytes();
        let write = async move {
            let result = stdin.write_all(document).await;
            drop(stdin);
            result
        };
        let (write_result, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| ConvertError::Io(e.to_string()))?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        write_result.map_err(|e| ConvertError::Io(e.to_string()))?;

        if output.stdout.is_empty() {
            return Err(ConvertError::EmptyOutput);
        }

        debug!(
            binary = %self.binary.display(),
            bytes = output.stdout.len(),
            "wkhtmltopdf finished"
        );

        Ok(Bytes::from(output.stdout))
    }
}

// =============================================================================
// Tests
// =============================================================================
