pub mod record_fetcher;
pub mod tld_server_cache;
pub mod whois_lookup;

pub use record_fetcher::{FetchedRecord, RecordFetcher};
pub use tld_server_cache::TldServerCache;
pub use whois_lookup::WhoisLookup;
