#[cfg(feature = "config")]
use core_config::{ConfigError, FromSettings, Settings};

/// Redis connection configuration
///
/// Can be constructed manually or read from the `[redis]` settings section
/// (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::redis::RedisConfig;
///
/// // Manual construction
/// let config = RedisConfig::new("127.0.0.1", 6379)
///     .with_password("secret")
///     .with_database(1);
///
/// // From settings (requires `config` feature)
/// let config = RedisConfig::from_settings(&settings)?;
///
/// let conn = database::redis::connect(&config).await?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedisConfig {
    /// Host name or IP address
    pub address: String,

    pub port: u16,

    /// Optional password for authentication (empty means none)
    pub password: Option<String>,

    /// Logical database index
    pub database: i64,
}

impl RedisConfig {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            password: None,
            database: 0,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password = (!password.is_empty()).then_some(password);
        self
    }

    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Full connection URL, e.g. `redis://:secret@127.0.0.1:6379/1`
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(password),
                self.address,
                self.port,
                self.database
            ),
            None => format!("redis://{}:{}/{}", self.address, self.port, self.database),
        }
    }

    /// Connection URL safe for logs
    pub fn redacted_url(&self) -> String {
        match self.password {
            Some(_) => format!(
                "redis://:***@{}:{}/{}",
                self.address, self.port, self.database
            ),
            None => self.url(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 6379)
    }
}

/// Read RedisConfig from settings
///
/// Keys (all optional):
/// - `redis.address` (default: 127.0.0.1)
/// - `redis.port` (default: 6379)
/// - `redis.password` (default: none)
/// - `redis.db` (default: 0)
#[cfg(feature = "config")]
impl FromSettings for RedisConfig {
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let config = RedisConfig::new(
            settings.get_string_or("redis.address", "127.0.0.1")?,
            settings.get_or("redis.port", 6379u16)?,
        )
        .with_password(settings.get_string_or("redis.password", "")?)
        .with_database(settings.get_or("redis.db", 0i64)?);

        Ok(config)
    }
}
