//! Startup sequence: cache, optional database, listener.
//!
//! The listener is bound only after every enabled dependency answered its
//! health check, so a process that cannot reach its dependencies never accepts a
//! connection.

use axum::Router;
use axum_helpers::server::{Server, ServerError};
use core_config::tracing::LogHandle;
use database::DatabaseError;
use thiserror::Error;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::state::AppContext;

/// Why the service could not start or keep serving
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] core_config::ConfigError),

    #[error("redis client ping error: {0}")]
    Cache(#[source] DatabaseError),

    #[error("database connection error: {0}")]
    Database(#[source] DatabaseError),

    #[error("listen error: {0}")]
    Bind(#[source] ServerError),

    #[error("http server error: {0}")]
    Serve(#[source] ServerError),
}

/// Connect every enabled dependency, in order: cache, then database.
pub async fn initialize(config: Config, log: LogHandle) -> Result<AppContext, BootstrapError> {
    let capabilities = config.capabilities();
    info!(
        with_cache = capabilities.with_cache,
        with_database = capabilities.with_database,
        log_backend = ?capabilities.log_backend,
        "Bootstrapping service"
    );

    let redis = match &config.redis {
        Some(redis_config) => Some(
            database::redis::connect(redis_config)
                .await
                .map_err(BootstrapError::Cache)?,
        ),
        None => None,
    };

    let db = match config.database.clone() {
        Some(db_config) => Some(
            database::sql::connect(db_config)
                .await
                .map_err(BootstrapError::Database)?,
        ),
        None => None,
    };

    Ok(AppContext {
        config,
        log,
        redis,
        db,
    })
}

/// Initialize dependencies, then bind the listener on the calling task.
pub async fn prepare(config: Config, log: LogHandle) -> Result<(AppContext, Server), BootstrapError> {
    let ctx = initialize(config, log).await?;

    match Server::bind(&ctx.config.server).await {
        Ok(server) => Ok((ctx, server)),
        Err(e) => {
            ctx.close().await;
            Err(BootstrapError::Bind(e))
        }
    }
}

/// Route table mounted on an engine built from the configured options
pub fn engine(ctx: &AppContext) -> Router {
    api::router(&ctx.config.engine)
}
