use core_config::{
    ConfigError, EngineOptions, FromSettings, LogConfig, LogFormat, ServerConfig, Settings,
};

// Import database configs from the database library
use database::redis::RedisConfig;
use database::sql::DatabaseConfig;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub log: LogConfig,
    /// `None` when `redis.enable = false`
    pub redis: Option<RedisConfig>,
    /// `None` unless `db.dsn` is set
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub engine: EngineOptions,
}

/// Which optional pieces this process runs with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub with_cache: bool,
    pub with_database: bool,
    pub log_backend: LogFormat,
}

impl Config {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            with_cache: self.redis.is_some(),
            with_database: self.database.is_some(),
            log_backend: self.log.format,
        }
    }
}

impl FromSettings for Config {
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let log = LogConfig::from_settings(settings)?; // Required - will fail if log.level is not set
        let redis = if settings.get_bool_or("redis.enable", true)? {
            Some(RedisConfig::from_settings(settings)?)
        } else {
            None
        };
        let database = DatabaseConfig::from_settings_optional(settings)?;
        let server = ServerConfig::from_settings(settings)?; // Uses defaults: 0.0.0.0:8080
        let engine = EngineOptions::from_settings(settings)?;

        Ok(Self {
            log,
            redis,
            database,
            server,
            engine,
        })
    }
}
