//! HTTP server layer for the conversion service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                          POST /                                 │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │    auth     │  │  handlers   │  │        routes           │  │
//! │  │ (basic auth)│  │ (validate,  │  │  (router config)        │  │
//! │  │             │  │  convert)   │  │                         │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, AuthError, BasicAuth, Credentials};
pub use handlers::{
    convert_handler, health_handler, AppState, ConversionRequest, ConversionResponse,
    ErrorResponse, HandlerError, HealthResponse,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_BODY_SIZE};
