//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! the health check policy, the probe Cache-Control header, environment-derived
//! settings, logging defaults and default paths. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Health Check Policy
// =============================================================================

/// Memory usage percentage at or above which the memory check fails.
pub const MEMORY_THRESHOLD_PERCENT: u64 = 90;

/// Bytes per megabyte for reported memory figures
pub const BYTES_PER_MB: u64 = 1024 * 1024;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Health state must never be served from an intermediary cache (RFC 9111).

pub const CACHE_CONTROL_NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// HTTP/1.0 cache directives sent alongside a completed evaluation
pub const PRAGMA_NO_CACHE: &str = "no-cache";
pub const EXPIRES_IMMEDIATELY: &str = "0";

// =============================================================================
// Environment-Derived Settings
// =============================================================================

/// Environment variable carrying the application version
pub const VERSION_ENV_VAR: &str = "APP_VERSION";

/// Environment variable carrying the deployment environment name
pub const ENVIRONMENT_ENV_VAR: &str = "APP_ENV";

/// Names used by earlier frontend deployments, read when the primary is unset
pub const LEGACY_VERSION_ENV_VAR: &str = "NEXT_PUBLIC_APP_VERSION";
pub const LEGACY_ENVIRONMENT_ENV_VAR: &str = "NEXT_PUBLIC_APP_ENV";

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_ENVIRONMENT: &str = "development";

// =============================================================================
// Routes
// =============================================================================

pub const HEALTH_PATH: &str = "/health";

/// Alias kept for deployments whose probes target the API prefix
pub const HEALTH_API_PATH: &str = formatcp!("/api{}", HEALTH_PATH);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "vitals=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Default graceful shutdown window in seconds
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Memory budget configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to drain connections on shutdown (default: 30)
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Memory budget configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    /// Budget in megabytes. Falls back to the cgroup limit, then host memory.
    pub limit_mb: Option<u64>,
}

impl MemoryConfig {
    /// Budget in bytes, or `None` when unset or not representable.
    pub fn limit_bytes(&self) -> Option<u64> {
        self.limit_mb.and_then(|mb| mb.checked_mul(BYTES_PER_MB))
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default path if it exists, or fall back
    /// to built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            ));
        }
        if self.memory.limit_mb == Some(0) {
            return Err(ConfigError::Validation(
                "memory.limit_mb must be non-zero when set".to_string(),
            ));
        }
        if let (Some(mb), None) = (self.memory.limit_mb, self.memory.limit_bytes()) {
            return Err(ConfigError::Validation(format!(
                "memory.limit_mb = {} exceeds the largest representable budget",
                mb
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.shutdown_grace_seconds, 30);
        assert_eq!(config.logging.format, "text");
        assert!(config.memory.limit_mb.is_none());
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 8080
shutdown_grace_seconds = 5

[logging]
format = "json"

[memory]
limit_mb = 512
"#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.shutdown_grace_seconds, 5);
        assert!(config.logging.is_json());
        assert_eq!(config.memory.limit_bytes(), Some(512 * 1024 * 1024));
    }

    #[test]
    fn test_zero_port_rejected() {
        let file = write_config("[http]\nport = 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_memory_limit_rejected() {
        let file = write_config("[memory]\nlimit_mb = 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_oversized_memory_limit_rejected() {
        // 2^44 MB does not fit in a u64 byte count
        let file = write_config("[memory]\nlimit_mb = 17592186044416\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("17592186044416"));
    }

    #[test]
    fn test_limit_bytes_does_not_wrap() {
        let memory = MemoryConfig {
            limit_mb: Some(u64::MAX / BYTES_PER_MB + 1),
        };
        assert_eq!(memory.limit_bytes(), None);

        let largest = MemoryConfig {
            limit_mb: Some(u64::MAX / BYTES_PER_MB),
        };
        assert!(largest.limit_bytes().is_some());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[http\nport = ");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = AppConfig::load_or_default(Some("/nonexistent/vitals.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_api_alias_path() {
        assert_eq!(HEALTH_API_PATH, "/api/health");
    }
}
