//! Configuration loading and resolution for ELD services
//!
//! Settings sources, in priority order:
//! 1. Command-line arguments (--port, --detector-url)
//! 2. Environment variables (ELD_PORT, ELD_DETECTOR_URL)
//! 3. TOML configuration file (~/.config/eld/<service>.toml)
//! 4. Built-in defaults (code constants)
//!
//! A missing or unparseable TOML file never prevents startup: the resolver
//! logs a warning and falls through to defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP port for the design synthesis service
pub const DEFAULT_PORT: u16 = 5740;

/// Default room-detector request timeout in seconds
pub const DEFAULT_DETECTOR_TIMEOUT_SECS: u64 = 30;

/// Bootstrap configuration loaded from a TOML file
///
/// These settings cannot change during runtime; the service must restart to
/// pick up changes to the TOML file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Room detector endpoint URL (optional)
    ///
    /// When absent the service runs in demo mode and every analysis uses the
    /// fixed demo room set.
    #[serde(default)]
    pub detector_url: Option<String>,

    /// Room detector request timeout in seconds
    #[serde(default)]
    pub detector_timeout_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub detector_url: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP server port
    pub port: u16,

    /// Room detector endpoint URL; None means demo mode
    pub detector_url: Option<String>,

    /// Room detector request timeout in seconds
    pub detector_timeout_secs: u64,

    /// Log level for the tracing subscriber
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve the service configuration for `service_name`
    ///
    /// Applies the CLI → ENV → TOML → default priority order. Failure to
    /// read or parse the TOML file degrades to defaults with a warning.
    pub fn resolve(service_name: &str, overrides: ConfigOverrides) -> Self {
        let toml_config = load_toml_config(service_name, overrides.config_path.as_deref())
            .unwrap_or_else(|e| {
                warn!("Config file unavailable ({}), using defaults", e);
                TomlConfig::default()
            });

        let port = overrides
            .port
            .or_else(|| env_port())
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let detector_url = overrides
            .detector_url
            .or_else(|| std::env::var("ELD_DETECTOR_URL").ok())
            .or(toml_config.detector_url)
            .filter(|url| !url.trim().is_empty());

        let detector_timeout_secs = toml_config
            .detector_timeout_secs
            .unwrap_or(DEFAULT_DETECTOR_TIMEOUT_SECS);

        let log_level = std::env::var("ELD_LOG")
            .ok()
            .unwrap_or_else(|| toml_config.logging.level.clone());

        info!(
            port = port,
            detector = detector_url.as_deref().unwrap_or("(demo mode)"),
            "Resolved {} configuration",
            service_name
        );

        Self {
            port,
            detector_url,
            detector_timeout_secs,
            log_level,
        }
    }
}

fn env_port() -> Option<u16> {
    let raw = std::env::var("ELD_PORT").ok()?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring unparseable ELD_PORT value: {}", raw);
            None
        }
    }
}

/// Default configuration file path for the platform
///
/// `~/.config/eld/<service>.toml` via the OS config directory.
pub fn default_config_path(service_name: &str) -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("eld").join(format!("{}.toml", service_name)))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Load the TOML configuration for `service_name`
///
/// An explicit `path` bypasses the platform default location.
pub fn load_toml_config(service_name: &str, path: Option<&std::path::Path>) -> Result<TomlConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path(service_name)?,
    };

    if !config_path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }

    let content = std::fs::read_to_string(&config_path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

    info!("Loaded TOML configuration from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_toml_config_all_fields_optional() {
        let config: TomlConfig = toml::from_str("").expect("empty TOML should parse");
        assert!(config.port.is_none());
        assert!(config.detector_url.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_config_full() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 6000
            detector_url = "http://localhost:9000/analyze"
            detector_timeout_secs = 10

            [logging]
            level = "debug"
            "#,
        )
        .expect("full TOML should parse");

        assert_eq!(config.port, Some(6000));
        assert_eq!(
            config.detector_url.as_deref(),
            Some("http://localhost:9000/analyze")
        );
        assert_eq!(config.detector_timeout_secs, Some(10));
        assert_eq!(config.logging.level, "debug");
    }
}
