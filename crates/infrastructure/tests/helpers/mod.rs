pub mod whois_server_mock;

#[allow(unused_imports)]
pub use whois_server_mock::*;
