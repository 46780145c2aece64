//! Optional relational database (MySQL or PostgreSQL, picked by URL scheme)

mod config;
mod connector;
mod health;

pub use config::DatabaseConfig;
pub use connector::{close, connect};
pub use health::check_health;

pub use sea_orm::DatabaseConnection;
