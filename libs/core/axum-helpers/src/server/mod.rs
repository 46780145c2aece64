//! Server infrastructure module.
//!
//! This module provides:
//! - Engine construction from a route table and [`EngineOptions`](core_config::EngineOptions)
//! - A listener with an observable lifecycle
//!   (`NotStarted → Listening → ShuttingDown → Stopped`)
//! - Signal-driven graceful shutdown bounded by [`SHUTDOWN_TIMEOUT`]
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{Server, ShutdownOutcome, create_engine, shutdown_signal};
//!
//! let engine = create_engine(routes, &options);
//! let server = Server::bind(&server_config).await?;
//!
//! match server.run(engine, shutdown_signal()).await? {
//!     ShutdownOutcome::Graceful => info!("drained"),
//!     ShutdownOutcome::TimedOut => warn!("cut off in-flight requests"),
//! }
//! ```

pub mod engine;
pub mod lifecycle;
pub mod shutdown;

// Re-export commonly used types and functions
pub use engine::create_engine;
pub use lifecycle::{SHUTDOWN_TIMEOUT, Server, ServerError, ServerState, ShutdownOutcome};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
