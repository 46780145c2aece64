//! Process settings store.
//!
//! Settings are read once at startup from an INI file and are read-only
//! afterwards. INI sections become key prefixes, so
//!
//! ```ini
//! degbug = false
//!
//! [http]
//! port = 8080
//! ```
//!
//! exposes `degbug` and `http.port`. Environment variables named
//! `BOOTSTRAP_<SECTION>__<KEY>` override file values (`BOOTSTRAP_HTTP__PORT=9000`).

use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ConfigError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BOOTSTRAP";

/// Immutable key-value settings store
#[derive(Clone, Debug)]
pub struct Settings {
    inner: Config,
    source: Option<PathBuf>,
}

impl Settings {
    /// Path used when the command line does not name a settings file
    pub const DEFAULT_PATH: &'static str = "./config/development.ini";

    /// Read and parse the INI file at `path`.
    ///
    /// There is no partial mode: a missing or malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut settings = Self::from_ini_str(&content)?;
        settings.source = Some(path.to_path_buf());
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Parse settings from INI text (environment overrides still apply)
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        let inner = Config::builder()
            .add_source(File::from_str(content, FileFormat::Ini))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(Self {
            inner,
            source: None,
        })
    }

    /// File the settings were loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.get_string(key).is_ok()
    }

    /// Required string value
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        self.get_or(key, default.to_string())
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.get_or(key, default)
    }

    /// Required typed value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.inner.get::<T>(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::MissingKey(key.to_string()),
            other => ConfigError::InvalidValue {
                key: key.to_string(),
                details: other.to_string(),
            },
        })
    }

    /// Typed value, falling back to `default` when the key is absent.
    /// A present but unparsable value is still an error.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Err(ConfigError::MissingKey(_)) => Ok(default),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
degbug = true

[log]
level = INFO
appname = sample

[http]
address = 127.0.0.1
port = 8081
gzip_enable = true
"#;

    #[test]
    fn test_sections_become_key_prefixes() {
        let settings = Settings::from_ini_str(SAMPLE).unwrap();
        assert_eq!(settings.get_string("log.level").unwrap(), "INFO");
        assert_eq!(settings.get_string("http.address").unwrap(), "127.0.0.1");
        assert_eq!(settings.get::<u16>("http.port").unwrap(), 8081);
        assert!(settings.get_bool_or("http.gzip_enable", false).unwrap());
    }

    #[test]
    fn test_top_level_keys_outside_sections() {
        let settings = Settings::from_ini_str(SAMPLE).unwrap();
        assert!(settings.get_bool_or("degbug", false).unwrap());
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let settings = Settings::from_ini_str(SAMPLE).unwrap();
        assert!(!settings.get_bool_or("http.cors_enable", false).unwrap());
        assert_eq!(settings.get_string_or("redis.password", "").unwrap(), "");
        assert!(!settings.contains("db.dsn"));
    }

    #[test]
    fn test_required_key_missing() {
        let settings = Settings::from_ini_str(SAMPLE).unwrap();
        let err = settings.get_string("redis.address").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "redis.address"));
    }

    #[test]
    fn test_invalid_typed_value() {
        let settings = Settings::from_ini_str("[http]\nport = eighty\n").unwrap();
        let err = settings.get_or::<u16>("http.port", 8080).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "http.port"));
    }

    #[test]
    fn test_environment_overrides_file() {
        temp_env::with_var("BOOTSTRAP_OVERRIDE__MARKER", Some("from-env"), || {
            let ini = format!("{SAMPLE}\n[override]\nmarker = from-file\n");
            let settings = Settings::from_ini_str(&ini).unwrap();
            assert_eq!(settings.get_string("override.marker").unwrap(), "from-env");
        });
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("./does/not/exist.ini").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("exist.ini"));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("malformed-{}.ini", std::process::id()));
        std::fs::write(&path, "[http\nport = 1\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_records_source_path() {
        let path = std::env::temp_dir().join(format!("valid-{}.ini", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.source(), Some(path.as_path()));

        std::fs::remove_file(&path).ok();
    }
}
