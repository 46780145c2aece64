//! Handles created during bootstrap.
//!
//! Each handle is written once while starting up and only read afterwards.
//! Optional capabilities are `None` when disabled, so nothing outside the
//! initializers and [`AppContext::close`] assumes they exist.

use core_config::tracing::LogHandle;
use database::redis::ConnectionManager;
use database::sql::DatabaseConnection;
use tracing::{error, info};

use crate::config::Config;

pub struct AppContext {
    pub config: Config,
    pub log: LogHandle,
    pub redis: Option<ConnectionManager>,
    pub db: Option<DatabaseConnection>,
}

impl AppContext {
    /// Release every handle; errors are logged, never returned.
    pub async fn close(self) {
        info!("Shutting down: closing connections");

        if let Some(db) = self.db {
            match database::sql::close(db).await {
                Ok(()) => info!("SQL database connection closed successfully"),
                Err(e) => error!(error = %e, "Error closing SQL database"),
            }
        }

        if let Some(redis) = self.redis {
            // Redis ConnectionManager closes automatically on drop
            drop(redis);
            info!("Redis connection closed successfully");
        }
    }
}
