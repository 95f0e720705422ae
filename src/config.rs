//! Configuration management for `travelrec`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelRecError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `travelrec` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelRecConfig {
    /// Dataset source configuration
    #[serde(default)]
    pub data: DataConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Card and message presentation
    #[serde(default)]
    pub presentation: PresentationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// URL (http/https) or local path of the dataset JSON document
    #[serde(default = "default_data_source")]
    pub source: String,
    /// Request timeout in seconds for HTTP sources
    #[serde(default = "default_data_timeout")]
    pub timeout_seconds: u32,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served for paths the router does not handle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// PEM certificate; TLS is used when both cert and key are set
    pub tls_cert: Option<String>,
    /// PEM private key
    pub tls_key: Option<String>,
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Image shown when a card image fails to load
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,
    /// Seconds before a status message is dismissed
    #[serde(default = "default_message_seconds")]
    pub message_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint; export is disabled when unset
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_data_source() -> String {
    "data/travel_recommendation_api.json".to_string()
}

fn default_data_timeout() -> u32 {
    30
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_placeholder_image_url() -> String {
    "https://via.placeholder.com/600x400?text=Image+Not+Available".to_string()
}

fn default_message_seconds() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_data_source(),
            timeout_seconds: default_data_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            placeholder_image_url: default_placeholder_image_url(),
            message_seconds: default_message_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl TravelRecConfig {
    /// Load configuration from `config_path`, or from the default location
    /// when `None`, layered under environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides: TRAVELREC__SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("TRAVELREC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelRecConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelrec").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.data.source.trim().is_empty() {
            self.data.source = default_data_source();
        }
        if self.data.timeout_seconds == 0 {
            self.data.timeout_seconds = default_data_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.presentation.placeholder_image_url.is_empty() {
            self.presentation.placeholder_image_url = default_placeholder_image_url();
        }
        if self.presentation.message_seconds == 0 {
            self.presentation.message_seconds = default_message_seconds();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_tls()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.data.timeout_seconds > 300 {
            return Err(TravelRecError::config("Data source timeout cannot exceed 300 seconds").into());
        }

        if self.presentation.message_seconds > 60 {
            return Err(TravelRecError::config("Message duration cannot exceed 60 seconds").into());
        }

        if self.server.port == 0 {
            return Err(TravelRecError::config("Server port must be greater than 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelRecError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelRecError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !is_http_url(&self.presentation.placeholder_image_url) {
            return Err(TravelRecError::config(
                "Placeholder image URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !is_http_url(endpoint) {
                return Err(TravelRecError::config(
                    "OTLP endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }

    /// TLS needs both halves of the key pair
    fn validate_tls(&self) -> Result<()> {
        match (&self.server.tls_cert, &self.server.tls_key) {
            (Some(_), None) | (None, Some(_)) => Err(TravelRecError::config(
                "Both server.tls_cert and server.tls_key must be set to enable TLS",
            )
            .into()),
            _ => Ok(()),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TravelRecConfig::default();
        assert_eq!(config.data.source, "data/travel_recommendation_api.json");
        assert_eq!(config.data.timeout_seconds, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.presentation.message_seconds, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.otlp_endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TravelRecConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TravelRecConfig::default();
        config.data.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_placeholder_url() {
        let mut config = TravelRecConfig::default();
        config.presentation.placeholder_image_url = "ftp://images".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_half_tls() {
        let mut config = TravelRecConfig::default();
        config.server.tls_cert = Some("cert.pem".to_string());
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("tls_key"));
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = TravelRecConfig::default();
        config.data.source = "  ".to_string();
        config.presentation.message_seconds = 0;
        config.apply_defaults();

        assert_eq!(config.data.source, "data/travel_recommendation_api.json");
        assert_eq!(config.presentation.message_seconds, 5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[data]\nsource = \"https://example.com/travel.json\"\n\n[server]\nport = 9090\n"
        )
        .unwrap();

        let config = TravelRecConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.data.source, "https://example.com/travel.json");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TravelRecConfig::load_from_path(Some(dir.path().join("none.toml"))).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TravelRecConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelrec"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
