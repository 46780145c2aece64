use crate::{ConfigError, FromSettings, Settings};
use std::net::Ipv4Addr;

/// Listener configuration (`http.address`, `http.port`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromSettings for ServerConfig {
    /// Defaults:
    /// - `http.address`: Ipv4Addr::UNSPECIFIED (0.0.0.0 - all interfaces)
    /// - `http.port`: 8080
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let host = settings.get_string_or("http.address", &Ipv4Addr::UNSPECIFIED.to_string())?;
        let port = settings.get_or("http.port", 8080u16)?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}

/// Switches for the cross-cutting middleware wrapped around the routes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Per-request diagnostic spans; off means production mode
    pub debug: bool,
    pub gzip_enable: bool,
    pub cors_enable: bool,
}

impl FromSettings for EngineOptions {
    /// The debug switch lives under the historical top-level key `degbug`;
    /// a correctly spelled `debug` is honored as well.
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let debug = settings.get_bool_or("degbug", false)? || settings.get_bool_or("debug", false)?;

        Ok(Self {
            debug,
            gzip_enable: settings.get_bool_or("http.gzip_enable", false)?,
            cors_enable: settings.get_bool_or("http.cors_enable", false)?,
        })
    }
}
