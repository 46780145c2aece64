//! # Axum Helpers
//!
//! Building blocks for serving an Axum router with a managed lifecycle.
//!
//! ## Modules
//!
//! - **[`server`]**: Engine construction, listener lifecycle, graceful shutdown
//! - **[`http`]**: Cross-cutting middleware (CORS, gzip, panic recovery, request logging)
//! - **[`errors`]**: Structured JSON error responses
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use axum_helpers::server::{Server, create_engine, shutdown_signal};
//! use core_config::{EngineOptions, ServerConfig};
//!
//! let routes = Router::new().route("/ping", get(ping));
//! let engine = create_engine(routes, &EngineOptions::default());
//!
//! let server = Server::bind(&ServerConfig::default()).await?;
//! let outcome = server.run(engine, shutdown_signal()).await?;
//! ```

pub mod errors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    SHUTDOWN_TIMEOUT, Server, ServerError, ServerState, ShutdownCoordinator, ShutdownOutcome,
    create_engine, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_gzip_layer, create_mirror_cors_layer, create_panic_layer, request_logger};

// Re-export error types
pub use errors::{ErrorCode, ErrorResponse};
