/// Unified database error type for all database operations
///
/// This provides a consistent error interface across Redis and SQL stores.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// SQL-specific errors (SeaORM)
    #[cfg(feature = "sql")]
    #[error("SQL error: {0}")]
    Sql(#[from] sea_orm::DbErr),

    /// Redis-specific errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_failed_message() {
        let err = DatabaseError::HealthCheckFailed("PING returned LOADING".to_string());
        assert_eq!(err.to_string(), "Health check failed: PING returned LOADING");
    }
}
