#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_whois_application::ports::{WhoisParser, WhoisTransport};
use ferrous_whois_domain::{Contact, DomainError, DomainInfo, WhoisInfo};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock WhoisTransport
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub endpoint: String,
    pub query: String,
    pub local_addr: Option<SocketAddr>,
}

#[derive(Clone)]
enum CannedResponse {
    Text(String),
    DialFailure,
    ReadFailure,
}

/// Transport returning canned text per endpoint and recording every call.
#[derive(Clone, Default)]
pub struct MockWhoisTransport {
    responses: Arc<RwLock<HashMap<String, CannedResponse>>>,
    calls: Arc<RwLock<Vec<RecordedQuery>>>,
}

impl MockWhoisTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, endpoint: &str, text: &str) {
        self.responses
            .write()
            .await
            .insert(endpoint.to_string(), CannedResponse::Text(text.to_string()));
    }

    pub async fn set_dial_failure(&self, endpoint: &str) {
        self.responses
            .write()
            .await
            .insert(endpoint.to_string(), CannedResponse::DialFailure);
    }

    pub async fn set_read_failure(&self, endpoint: &str) {
        self.responses
            .write()
            .await
            .insert(endpoint.to_string(), CannedResponse::ReadFailure);
    }

    pub async fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl WhoisTransport for MockWhoisTransport {
    async fn query(
        &self,
        endpoint: &str,
        query: &str,
        _timeout: Duration,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError> {
        self.calls.write().await.push(RecordedQuery {
            endpoint: endpoint.to_string(),
            query: query.to_string(),
            local_addr,
        });

        match self.responses.read().await.get(endpoint).cloned() {
            Some(CannedResponse::Text(text)) => Ok(text),
            Some(CannedResponse::ReadFailure) => Err(DomainError::ReadFailed {
                server: endpoint.to_string(),
                message: "connection reset by peer".to_string(),
            }),
            Some(CannedResponse::DialFailure) | None => Err(DomainError::DialFailed {
                server: endpoint.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

// ============================================================================
// Mock WhoisParser
// ============================================================================

/// Understands a tiny `key: value` dialect:
/// `domain`, `whois_server`, `registrar`. Text containing `UNPARSEABLE`
/// is rejected; text without a `domain` line has no domain section.
#[derive(Clone, Default)]
pub struct MockWhoisParser;

impl WhoisParser for MockWhoisParser {
    fn parse(&self, raw: &str) -> Result<WhoisInfo, DomainError> {
        if raw.contains("UNPARSEABLE") {
            return Err(DomainError::ParseFailed("domain whois data is invalid".to_string()));
        }

        let mut info = WhoisInfo::default();
        let mut domain: Option<DomainInfo> = None;

        for line in raw.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "domain" => {
                    domain.get_or_insert_with(DomainInfo::default).domain = Some(value);
                }
                "whois_server" => {
                    domain.get_or_insert_with(DomainInfo::default).whois_server = Some(value);
                }
                "registrar" => {
                    info.registrar = Some(Contact {
                        name: Some(value),
                        ..Default::default()
                    });
                }
                _ => {}
            }
        }

        info.domain = domain;
        Ok(info)
    }
}

// ============================================================================
// Canned responses
// ============================================================================

pub const ROOT_ENDPOINT: &str = "whois.iana.org:43";
pub const VERISIGN_ENDPOINT: &str = "whois.verisign-grs.com:43";
pub const MARKMONITOR_ENDPOINT: &str = "whois.markmonitor.com:43";

pub fn iana_response(tld: &str, server: &str) -> String {
    format!(
        "% IANA WHOIS server\n% for more information on IANA, visit http://www.iana.org\n\ndomain:       {}\n\norganisation: Example Registry\n\nwhois:        {}\n\nstatus:       ACTIVE\n",
        tld.to_uppercase(),
        server
    )
}

pub fn thin_registry_response(domain: &str, referral: &str) -> String {
    format!(
        "domain: {}\nwhois_server: {}\nregistrar: MarkMonitor Inc.\n",
        domain, referral
    )
}

pub fn registrar_response(domain: &str) -> String {
    format!("domain: {}\nregistrar: MarkMonitor, Inc.\n", domain)
}
