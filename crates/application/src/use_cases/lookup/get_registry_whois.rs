use ferrous_whois_domain::{split_tld, DomainError, LookupStage, RecordLookup, Referral};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::services::RecordFetcher;
use crate::use_cases::ResolveTldServerUseCase;

/// Registry-only lookup: resolve the TLD server, query it, parse.
pub struct GetRegistryWhoisUseCase {
    resolve_tld_server: Arc<ResolveTldServerUseCase>,
    fetcher: Arc<RecordFetcher>,
}

impl GetRegistryWhoisUseCase {
    pub fn new(
        resolve_tld_server: Arc<ResolveTldServerUseCase>,
        fetcher: Arc<RecordFetcher>,
    ) -> Self {
        Self {
            resolve_tld_server,
            fetcher,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<RecordLookup, DomainError> {
        let tld = split_tld(domain)?;

        let server = self
            .resolve_tld_server
            .execute(tld, local_addr)
            .await
            .map_err(|e| e.at(LookupStage::TldServer))?;

        let fetched = self
            .fetcher
            .fetch(
                &server,
                domain,
                local_addr,
                LookupStage::RegistryQuery,
                LookupStage::RegistryParse,
            )
            .await?;

        debug!(domain = %domain, server = %server, "Registry record parsed");

        Ok(RecordLookup {
            info: fetched.info,
            raw: fetched.raw,
            server,
            referral: Referral::NotRequested,
        })
    }
}
