//! Ferrous WHOIS Infrastructure Layer
pub mod whois;
