//! WHOIS adapters
//!
//! - **Transport**: one TCP exchange per query (`transport::tcp`)
//! - **Parser**: `Key: Value` response parser (`parser::key_value`)
//! - **Builder**: wiring into a shared `WhoisLookup`
//!
//! ## Example Usage
//!
//! ```no_run
//! use ferrous_whois_domain::WhoisConfig;
//! use ferrous_whois_infrastructure::whois::WhoisLookupBuilder;
//!
//! # async fn run() -> Result<(), ferrous_whois_domain::DomainError> {
//! let lookup = WhoisLookupBuilder::new(WhoisConfig::default()).build();
//! let record = lookup.get_registrar_whois("github.com").await?;
//! println!("{}", record.raw);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod parser;
pub mod transport;

pub use builder::WhoisLookupBuilder;
pub use parser::{parse_date, KeyValueWhoisParser};
pub use transport::TcpWhoisTransport;
