use ferrous_whois_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::ports::WhoisTransport;
use crate::services::TldServerCache;

/// Finds the authoritative WHOIS server for a TLD, asking the root
/// directory server only on a cache miss.
pub struct ResolveTldServerUseCase {
    transport: Arc<dyn WhoisTransport>,
    cache: Arc<TldServerCache>,
    root_server: String,
    timeout: Duration,
}

impl ResolveTldServerUseCase {
    pub fn new(
        transport: Arc<dyn WhoisTransport>,
        cache: Arc<TldServerCache>,
        root_server: String,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            cache,
            root_server,
            timeout,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        tld: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError> {
        if let Some(host) = self.cache.lookup(tld) {
            debug!(tld = %tld, server = %host, "TLD server cache hit");
            return Ok(host);
        }

        let raw = self
            .transport
            .query(&self.root_server, tld, self.timeout, local_addr)
            .await
            .map_err(|e| DomainError::ServerNotFound {
                tld: tld.to_string(),
                cause: Some(Box::new(e)),
            })?;

        let host = extract_whois_server(&raw).ok_or_else(|| DomainError::ServerNotFound {
            tld: tld.to_string(),
            cause: None,
        })?;

        self.cache.store(tld, host);
        debug!(tld = %tld, server = %host, root = %self.root_server, "TLD server discovered");

        Ok(host.to_string())
    }
}

/// Host from the first `whois:` line that carries one.
pub fn extract_whois_server(raw: &str) -> Option<&str> {
    raw.lines()
        .filter(|line| line.starts_with("whois:"))
        .find_map(|line| line.split_whitespace().nth(1))
}
