use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::{ConfigError, FromSettings, Settings};

/// Minimum severity of emitted log records, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    DPanic,
    Panic,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::DPanic => "DPANIC",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }

    /// `tracing` stops at ERROR, so the three levels above it share that filter.
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            Severity::Trace => LevelFilter::TRACE,
            Severity::Debug => LevelFilter::DEBUG,
            Severity::Info => LevelFilter::INFO,
            Severity::Warn => LevelFilter::WARN,
            Severity::Error | Severity::DPanic | Severity::Panic | Severity::Fatal => {
                LevelFilter::ERROR
            }
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "DPANIC" => Ok(Severity::DPanic),
            "PANIC" => Ok(Severity::Panic),
            "FATAL" => Ok(Severity::Fatal),
            _ => Err(format!("log level {} is not supported", s)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log record rendering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable single line
    Console,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "console" | "text" => Ok(LogFormat::Console),
            _ => Err(format!("log format {} is not supported", s)),
        }
    }
}

/// Logging configuration (`[log]` section)
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: Severity,
    pub appname: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub const DEFAULT_APPNAME: &'static str = "http-bootstrap";

    pub fn new(level: Severity, appname: impl Into<String>) -> Self {
        Self {
            level,
            appname: appname.into(),
            format: LogFormat::default(),
        }
    }
}

impl FromSettings for LogConfig {
    /// Requires `log.level`; `log.appname` and `log.format` have defaults
    fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let raw_level = settings.get_string("log.level")?;
        let level = raw_level
            .parse::<Severity>()
            .map_err(|details| ConfigError::InvalidValue {
                key: "log.level".to_string(),
                details,
            })?;

        let format = settings
            .get_string_or("log.format", "json")?
            .parse::<LogFormat>()
            .map_err(|details| ConfigError::InvalidValue {
                key: "log.format".to_string(),
                details,
            })?;

        Ok(Self {
            level,
            appname: settings.get_string_or("log.appname", Self::DEFAULT_APPNAME)?,
            format,
        })
    }
}
