use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::{ConfigError, LoggingConfig, WhoisConfig};

/// Main configuration, loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub whois: WhoisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values from the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub timeout_ms: Option<u64>,
    pub local_addr: Option<SocketAddr>,
    pub root_server: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the file at `config_path` (defaults when `None`), applies the
    /// overrides and fills unset fields with defaults.
    pub fn load(
        config_path: Option<&str>,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(cli_overrides);
        config.whois = config.whois.merged_with_defaults();

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.whois.default_timeout_ms = timeout_ms;
        }
        if let Some(local_addr) = overrides.local_addr {
            self.whois.local_addr = Some(local_addr);
        }
        if let Some(root_server) = overrides.root_server {
            self.whois.whois_tld_server = root_server;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.whois.validate()?;

        match self.logging.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                other
            ))),
        }
    }
}
