use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::ConfigError;

pub const DEFAULT_ROOT_CACHE_DURATION_MS: u64 = 3_600_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_WHOIS_TLD_SERVER: &str = "whois.iana.org:43";
pub const DEFAULT_WHOIS_PORT: u16 = 43;

/// WHOIS lookup configuration
///
/// Zero or empty fields mean "use the default"; see
/// [`WhoisConfig::merged_with_defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WhoisConfig {
    /// How long a TLD → server mapping from the root server stays fresh
    #[serde(default = "default_root_cache_duration_ms")]
    pub root_cache_duration_ms: u64,

    /// Deadline for each dial + read exchange
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Root directory server, `host:port`
    #[serde(default = "default_whois_tld_server")]
    pub whois_tld_server: String,

    /// Port used for registry and registrar hosts
    #[serde(default = "default_whois_port")]
    pub whois_port: u16,

    /// Local address outbound connections bind to (unbound when absent)
    #[serde(default)]
    pub local_addr: Option<SocketAddr>,
}

impl WhoisConfig {
    /// Replaces every zero/empty field with its default. Explicit values are
    /// kept as given.
    pub fn merged_with_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            root_cache_duration_ms: if self.root_cache_duration_ms == 0 {
                defaults.root_cache_duration_ms
            } else {
                self.root_cache_duration_ms
            },
            default_timeout_ms: if self.default_timeout_ms == 0 {
                defaults.default_timeout_ms
            } else {
                self.default_timeout_ms
            },
            whois_tld_server: if self.whois_tld_server.trim().is_empty() {
                defaults.whois_tld_server
            } else {
                self.whois_tld_server
            },
            whois_port: if self.whois_port == 0 {
                defaults.whois_port
            } else {
                self.whois_port
            },
            local_addr: self.local_addr,
        }
    }

    pub fn root_cache_duration(&self) -> Duration {
        Duration::from_millis(self.root_cache_duration_ms)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn with_root_cache_duration(mut self, duration: Duration) -> Self {
        self.root_cache_duration_ms = whole_millis(duration);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout_ms = whole_millis(timeout);
        self
    }

    pub fn with_tld_server(mut self, server: impl Into<String>) -> Self {
        self.whois_tld_server = server.into();
        self
    }

    pub fn with_whois_port(mut self, port: u16) -> Self {
        self.whois_port = port;
        self
    }

    pub fn with_local_addr(mut self, local_addr: Option<SocketAddr>) -> Self {
        self.local_addr = local_addr;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = self.whois_tld_server.trim();
        if server.is_empty() {
            return Ok(());
        }
        match server.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
            _ => Err(ConfigError::Validation(format!(
                "whois_tld_server must be host:port, got '{}'",
                server
            ))),
        }
    }
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            root_cache_duration_ms: default_root_cache_duration_ms(),
            default_timeout_ms: default_timeout_ms(),
            whois_tld_server: default_whois_tld_server(),
            whois_port: default_whois_port(),
            local_addr: None,
        }
    }
}

/// Milliseconds in `duration`, rounded up so a non-zero duration never
/// reads as "unset".
fn whole_millis(duration: Duration) -> u64 {
    if duration.is_zero() {
        return 0;
    }
    let millis = duration.as_nanos().div_ceil(1_000_000);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

fn default_root_cache_duration_ms() -> u64 {
    DEFAULT_ROOT_CACHE_DURATION_MS
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_whois_tld_server() -> String {
    DEFAULT_WHOIS_TLD_SERVER.to_string()
}

fn default_whois_port() -> u16 {
    DEFAULT_WHOIS_PORT
}
