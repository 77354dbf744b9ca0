//! html2pdf-server - Render HTML documents to PDF over HTTP.
//!
//! This binary loads configuration, starts logging and serves the router.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use html2pdf_server::{
    config::Config,
    convert::{ConversionService, WkhtmltopdfRenderer},
    server::create_router,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Variables already present in the environment take precedence over .env
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();

    init_logging(config.verbose);

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => {
            error!("Failed to load .env file: {}", e);
            return ExitCode::FAILURE;
        }
    }

    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("html2pdf-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Renderer: {}", config.wkhtmltopdf_path);
    info!("  Convert timeout: {}s", config.convert_timeout);
    info!("  Max body size: {} bytes", config.max_body_size);
    info!("  Auth realm: {}", config.realm);

    let renderer = WkhtmltopdfRenderer::new(&config.wkhtmltopdf_path);
    let service = ConversionService::with_timeout(renderer, config.convert_timeout());

    let router = create_router(service, config.router_config());

    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "html2pdf_server=debug,tower_http=debug"
    } else {
        "html2pdf_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
