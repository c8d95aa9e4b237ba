pub mod lookup;
pub mod tld_server;

// Re-export use cases
pub use lookup::{GetRegistrarWhoisUseCase, GetRegistryWhoisUseCase, GetWhoisUseCase};
pub use tld_server::{extract_whois_server, ResolveTldServerUseCase};
