use std::time::Duration;

use thiserror::Error;

/// Errors raised while validating a conversion request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Body is absent, empty, or not a JSON object
    #[error("No JSON data provided in request")]
    NoJsonData,

    /// Body parsed but carries no usable `html` field
    #[error("No 'html' key found in provided JSON data")]
    MissingHtml,

    /// A field is present but has the wrong type (e.g. a numeric `title`)
    #[error("Invalid JSON data: {0}")]
    InvalidField(String),
}

/// Errors raised by the HTML to PDF renderer
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// The renderer process could not be started
    #[error("Failed to start renderer: {0}")]
    Spawn(String),

    /// Piping data to or from the renderer failed
    #[error("Renderer I/O error: {0}")]
    Io(String),

    /// The renderer exited unsuccessfully
    #[error("Renderer exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    /// The renderer succeeded but produced no bytes
    #[error("Renderer produced no output")]
    EmptyOutput,

    /// The renderer output does not carry a PDF signature
    #[error("Renderer output is not a PDF document")]
    InvalidPdf,

    /// The conversion did not finish within the configured bound
    #[error("Conversion timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

impl ConvertError {
    /// Whether this error was caused by the conversion timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ConvertError::Timeout { .. })
    }
}
