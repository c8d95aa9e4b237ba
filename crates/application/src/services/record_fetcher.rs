use ferrous_whois_domain::{whois_endpoint, DomainError, LookupStage, WhoisInfo};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::ports::{WhoisParser, WhoisTransport};

/// Query one registry/registrar host for a domain and parse the answer.
pub struct RecordFetcher {
    transport: Arc<dyn WhoisTransport>,
    parser: Arc<dyn WhoisParser>,
    whois_port: u16,
    timeout: Duration,
}

/// Raw text plus the parsed record from one server.
pub struct FetchedRecord {
    pub raw: String,
    pub info: WhoisInfo,
}

impl RecordFetcher {
    pub fn new(
        transport: Arc<dyn WhoisTransport>,
        parser: Arc<dyn WhoisParser>,
        whois_port: u16,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            parser,
            whois_port,
            timeout,
        }
    }

    pub async fn query(
        &self,
        host: &str,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError> {
        let endpoint = whois_endpoint(host, self.whois_port);
        let raw = self
            .transport
            .query(&endpoint, domain, self.timeout, local_addr)
            .await?;

        debug!(server = %endpoint, domain = %domain, bytes = raw.len(), "WHOIS response received");
        Ok(raw)
    }

    pub fn parse(&self, raw: &str) -> Result<WhoisInfo, DomainError> {
        self.parser.parse(raw)
    }

    /// Query then parse, tagging failures with the given stages.
    pub async fn fetch(
        &self,
        host: &str,
        domain: &str,
        local_addr: Option<SocketAddr>,
        query_stage: LookupStage,
        parse_stage: LookupStage,
    ) -> Result<FetchedRecord, DomainError> {
        let raw = self
            .query(host, domain, local_addr)
            .await
            .map_err(|e| e.at(query_stage))?;
        let info = self.parse(&raw).map_err(|e| e.at(parse_stage))?;

        Ok(FetchedRecord { raw, info })
    }
}
