//! HTTP service bootstrap: settings, logging, cache, optional database,
//! engine, routes and a signal-driven lifecycle.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod state;
