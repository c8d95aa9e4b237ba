pub mod whois_parser;
pub mod whois_transport;

pub use whois_parser::WhoisParser;
pub use whois_transport::WhoisTransport;
