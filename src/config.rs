//! Configuration management for the conversion service.
//!
//! Configuration comes from:
//! - Command-line arguments via clap
//! - Environment variables (a `.env` file in the working directory is merged
//!   into the environment at startup, see `main.rs`)
//! - Defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `BASIC_AUTH_USERNAME` - Username required on the conversion endpoint (required)
//! - `BASIC_AUTH_PASSWORD` - Password required on the conversion endpoint (required)
//! - `HTML2PDF_HOST` - Server bind address (default: 0.0.0.0)
//! - `HTML2PDF_PORT` - Server port (default: 4000)
//! - `HTML2PDF_AUTH_REALM` - Realm sent in 401 challenges (default: html2pdf)
//! - `HTML2PDF_WKHTMLTOPDF` - Path to the wkhtmltopdf binary (default: wkhtmltopdf)
//! - `HTML2PDF_CONVERT_TIMEOUT` - Per-conversion timeout in seconds (default: 60)
//! - `HTML2PDF_MAX_BODY_SIZE` - Maximum request body in bytes (default: 10 MiB)

use std::time::Duration;

use clap::Parser;

use crate::convert::{DEFAULT_CONVERT_TIMEOUT, DEFAULT_WKHTMLTOPDF_BINARY};
use crate::server::auth::{Credentials, DEFAULT_REALM};
use crate::server::{RouterConfig, DEFAULT_MAX_BODY_SIZE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default conversion timeout in seconds.
pub const DEFAULT_CONVERT_TIMEOUT_SECS: u64 = DEFAULT_CONVERT_TIMEOUT.as_secs();

// =============================================================================
// CLI Arguments
// =============================================================================

/// html2pdf-server - Render HTML documents to PDF over HTTP.
///
/// Accepts `POST /` with a JSON body `{"html": "...", "title": "..."}` and
/// answers with `{"pdf": "<base64>"}`. Requests must carry HTTP Basic
/// credentials matching BASIC_AUTH_USERNAME and BASIC_AUTH_PASSWORD.
#[derive(Parser, Debug, Clone)]
#[command(name = "html2pdf-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HTML2PDF_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HTML2PDF_PORT")]
    pub port: u16,

    /// Maximum request body size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE, env = "HTML2PDF_MAX_BODY_SIZE")]
    pub max_body_size: usize,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Username required for HTTP Basic authentication.
    #[arg(long, env = "BASIC_AUTH_USERNAME", hide_env_values = true)]
    pub username: String,

    /// Password required for HTTP Basic authentication.
    #[arg(long, env = "BASIC_AUTH_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Realm announced in the WWW-Authenticate challenge.
    #[arg(long, default_value = DEFAULT_REALM, env = "HTML2PDF_AUTH_REALM")]
    pub realm: String,

    // =========================================================================
    // Renderer Configuration
    // =========================================================================
    /// Path to the wkhtmltopdf binary.
    #[arg(long, default_value = DEFAULT_WKHTMLTOPDF_BINARY, env = "HTML2PDF_WKHTMLTOPDF")]
    pub wkhtmltopdf_path: String,

    /// Maximum time in seconds a single conversion may take.
    #[arg(long, default_value_t = DEFAULT_CONVERT_TIMEOUT_SECS, env = "HTML2PDF_CONVERT_TIMEOUT")]
    pub convert_timeout: u64,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() {
            return Err(
                "Username is required. Set --username or BASIC_AUTH_USERNAME".to_string(),
            );
        }
        if self.password.is_empty() {
            return Err(
                "Password is required. Set --password or BASIC_AUTH_PASSWORD".to_string(),
            );
        }

        if self.convert_timeout == 0 {
            return Err("convert_timeout must be greater than 0".to_string());
        }
        if self.max_body_size == 0 {
            return Err("max_body_size must be greater than 0".to_string());
        }
        if self.wkhtmltopdf_path.trim().is_empty() {
            return Err("wkhtmltopdf_path must not be empty".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The credentials every conversion request must present.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// The per-conversion timeout.
    pub fn convert_timeout(&self) -> Duration {
        Duration::from_secs(self.convert_timeout)
    }

    /// Build the router configuration.
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::new(self.credentials())
            .with_realm(&self.realm)
            .with_max_body_size(self.max_body_size)
            .with_tracing(!self.no_tracing)
    }
}

// =============================================================================
// Tests
// =============================================================================
