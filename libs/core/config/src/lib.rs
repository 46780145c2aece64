pub mod log;
pub mod server;
pub mod settings;
pub mod tracing;

use thiserror::Error;

pub use log::{LogConfig, LogFormat, Severity};
pub use server::{EngineOptions, ServerConfig};
pub use settings::Settings;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(String),

    #[error("Setting '{0}' is required but not set")]
    MissingKey(String),

    #[error("Invalid value for setting '{key}': {details}")]
    InvalidValue { key: String, details: String },
}

/// Trait for configuration sections that can be read out of a loaded [`Settings`] store
pub trait FromSettings: Sized {
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError>;
}
