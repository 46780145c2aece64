//! HTTP middleware module.
//!
//! This module provides the layers the engine wraps around the route table:
//! - CORS that mirrors the request origin
//! - gzip response compression
//! - Panic recovery into a JSON 500
//! - One log line per request
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_mirror_cors_layer, request_logger};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(request_logger))
//!     .layer(create_mirror_cors_layer());
//! ```

pub mod compression;
pub mod cors;
pub mod panic;
pub mod request_log;

// Re-export commonly used functions
pub use compression::{GzipPredicate, create_gzip_layer};
pub use cors::{CORS_MAX_AGE, create_mirror_cors_layer};
pub use panic::{PanicHandler, create_panic_layer, panic_response};
pub use request_log::request_logger;
