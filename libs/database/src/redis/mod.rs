//! Redis connector and liveness check

mod config;
mod connector;
mod health;

pub use config::RedisConfig;
pub use connector::connect;
pub use health::check_health;

// Re-export the handle type for convenience
pub use redis::aio::ConnectionManager;
