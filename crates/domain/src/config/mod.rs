//! Configuration module for Ferrous WHOIS
//!
//! - `root`: Main configuration and CLI overrides
//! - `whois`: Lookup settings (root server, timeouts, cache window)
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod root;
pub mod whois;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use whois::WhoisConfig;
