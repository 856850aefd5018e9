//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wtpbridge.toml` in the working directory. Everything except
//! the remote credentials has a default, so the file is optional when the
//! `WTP_*` variables are set. Environment variables take precedence over
//! file values.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use wtpbridge_adapter_wtp_reqwest::WtpApiConfig;
use wtpbridge_app::services::reconciler::ClearPolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WTP API connection.
    pub remote: RemoteConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Reconciliation behaviour.
    pub reconcile: ReconcileConfig,
}

/// WTP API address and login credentials.
#[derive(Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Host address, with or without scheme.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// `always` or `preserve_on_discovery_failure`.
    pub policy: ClearPolicy,
}

impl Config {
    /// Load configuration from `wtpbridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("wtpbridge.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("WTP_HOST") {
            self.remote.host = val;
        }
        if let Some(val) = lookup("WTP_USERNAME") {
            self.remote.username = val;
        }
        if let Some(val) = lookup("WTP_PASSWORD") {
            self.remote.password = val;
        }
        if let Some(secs) = lookup("WTP_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.remote.timeout_secs = secs;
        }
        if let Some(val) = lookup("WTP_BRIDGE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("WTP_BRIDGE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("WTP_BRIDGE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("WTP_PRESERVE_ON_FAILURE") {
            self.reconcile.policy = if parse_flag("WTP_PRESERVE_ON_FAILURE", &val)? {
                ClearPolicy::PreserveOnDiscoveryFailure
            } else {
                ClearPolicy::Always
            };
        }
        if let Some(val) = lookup("WTP_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "remote host must be set (WTP_HOST)".to_string(),
            ));
        }
        if self.remote.username.is_empty() {
            return Err(ConfigError::Validation(
                "remote username must be set (WTP_USERNAME)".to_string(),
            ));
        }
        if self.remote.password.is_empty() {
            return Err(ConfigError::Validation(
                "remote password must be set (WTP_PASSWORD)".to_string(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be non-zero".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Connection settings for the WTP client.
    #[must_use]
    pub fn api_config(&self) -> WtpApiConfig {
        WtpApiConfig::new(
            self.remote.host.clone(),
            self.remote.username.clone(),
            self.remote.password.clone(),
        )
        .with_timeout(Duration::from_secs(self.remote.timeout_secs))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Validation(format!(
            "{key} must be a boolean, got {value:?}"
        ))),
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8581,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wtpbridged=info,wtpbridge_app=info,wtpbridge_adapter_wtp_reqwest=info,tower_http=debug"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
