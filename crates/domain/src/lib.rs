//! Ferrous WHOIS Domain Layer
pub mod config;
pub mod domain_name;
pub mod errors;
pub mod whois_record;
pub mod whois_result;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, WhoisConfig};
pub use domain_name::{split_tld, whois_endpoint};
pub use errors::{DomainError, ErrorKind, LookupStage};
pub use whois_record::{Contact, DomainInfo, WhoisInfo};
pub use whois_result::{RecordLookup, Referral, WhoisResult};
