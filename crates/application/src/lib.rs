//! Ferrous WHOIS Application Layer
//!
//! Ports for the network transport and the response parser, the TLD server
//! cache, and the lookup use cases built on top of them.
pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::{WhoisParser, WhoisTransport};
pub use services::{TldServerCache, WhoisLookup};
