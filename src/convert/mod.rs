//! HTML to PDF conversion layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │ ConversionJob
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ConversionService             │
//! │   (timeout, PDF check, base64)          │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     PdfRenderer (wkhtmltopdf, ...)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`ConversionService`]: Runs a job through the renderer and encodes the result
//! - [`ConversionJob`]: A validated HTML document plus its title
//! - [`PdfRenderer`]: Trait implemented by rendering engines
//! - [`WkhtmltopdfRenderer`]: Renderer that drives the `wkhtmltopdf` binary

mod renderer;
mod service;

pub use renderer::{
    is_pdf, PdfRenderer, RenderOptions, WkhtmltopdfRenderer, DEFAULT_TITLE,
    DEFAULT_WKHTMLTOPDF_BINARY, PDF_SIGNATURE,
};
pub use service::{encode_pdf, ConversionJob, ConversionService, DEFAULT_CONVERT_TIMEOUT};
