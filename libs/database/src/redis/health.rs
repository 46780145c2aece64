use redis::aio::ConnectionManager;
use tracing::debug;

use crate::common::DatabaseError;

/// Check Redis health
///
/// Executes a `PING` command to verify the Redis connection is working.
/// Used once at startup as the liveness check.
///
/// # Returns
/// * `Ok(())` if Redis answered `PONG`
/// * `Err(DatabaseError)` if the health check fails
pub async fn check_health(conn: &mut ConnectionManager) -> Result<(), DatabaseError> {
    debug!("Running Redis health check");

    let response: String = redis::cmd("PING").query_async(conn).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("Redis health check failed: {}", e))
    })?;

    if response != "PONG" {
        return Err(DatabaseError::HealthCheckFailed(format!(
            "Redis PING returned unexpected response: {}",
            response
        )));
    }

    debug!("Redis health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_check_health_against_container() {
        let container = test_utils::TestRedis::new().await;
        let client = redis::Client::open(container.connection_string()).unwrap();
        let mut manager = ConnectionManager::new(client).await.unwrap();

        assert!(check_health(&mut manager).await.is_ok());
    }
}
