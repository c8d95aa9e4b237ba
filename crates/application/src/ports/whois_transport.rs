use async_trait::async_trait;
use ferrous_whois_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// One WHOIS exchange: connect to `endpoint` (`host:port`), send `query`
/// followed by CRLF, and return everything the server wrote before closing.
///
/// Implementations open a fresh connection per call, release it on every
/// exit path, and never retry.
#[async_trait]
pub trait WhoisTransport: Send + Sync {
    async fn query(
        &self,
        endpoint: &str,
        query: &str,
        timeout: Duration,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError>;
}
