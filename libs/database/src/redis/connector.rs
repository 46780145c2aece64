use redis::Client;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use std::time::Instant;
use tracing::info;

use super::{RedisConfig, check_health};
use crate::common::DatabaseResult;

/// Connect to Redis and verify it answers `PING`.
///
/// The client is opened lazily; the `ConnectionManager` gets zero
/// reconnection retries so an unreachable server fails on the first
/// attempt. The check uses the library's default timeouts.
///
/// # Example
/// ```ignore
/// use database::redis::{RedisConfig, connect};
/// use redis::AsyncCommands;
///
/// let mut conn = connect(&RedisConfig::new("127.0.0.1", 6379)).await?;
/// conn.set::<_, _, ()>("key", "value").await?;
/// ```
pub async fn connect(config: &RedisConfig) -> DatabaseResult<ConnectionManager> {
    info!(url = %config.redacted_url(), "Connecting to Redis");
    let started = Instant::now();

    let client = Client::open(config.url())?;
    let manager_config = ConnectionManagerConfig::new().set_number_of_retries(0);
    let mut manager = ConnectionManager::new_with_config(client, manager_config).await?;

    check_health(&mut manager).await?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Successfully connected to Redis"
    );
    Ok(manager)
}
