pub mod resolve;

pub use resolve::{extract_whois_server, ResolveTldServerUseCase};
