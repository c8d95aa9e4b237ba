use ferrous_whois_domain::{split_tld, DomainError, LookupStage, WhoisResult};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::get_registrar_whois::{next_hop, NextHop};
use crate::services::RecordFetcher;
use crate::use_cases::GetRegistryWhoisUseCase;

/// Registry + registrar lookup that keeps both raw responses and the server
/// each one came from.
pub struct GetWhoisUseCase {
    get_registry_whois: Arc<GetRegistryWhoisUseCase>,
    fetcher: Arc<RecordFetcher>,
}

impl GetWhoisUseCase {
    pub fn new(
        get_registry_whois: Arc<GetRegistryWhoisUseCase>,
        fetcher: Arc<RecordFetcher>,
    ) -> Self {
        Self {
            get_registry_whois,
            fetcher,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<WhoisResult, DomainError> {
        let tld = split_tld(domain)?;
        let registry = self.get_registry_whois.execute(domain, local_addr).await?;

        let hop = next_hop(&registry.info)?;

        let mut result = WhoisResult {
            domain: domain.to_string(),
            tld: tld.to_string(),
            registry_whois_server: registry.server,
            registry_whois_raw: registry.raw,
            registry_whois: Some(registry.info),
            ..Default::default()
        };

        if let NextHop::Registrar(host) = hop {
            let registrar = self
                .fetcher
                .fetch(
                    &host,
                    domain,
                    local_addr,
                    LookupStage::RegistrarQuery,
                    LookupStage::RegistrarParse,
                )
                .await?;

            result.registrar_whois_server = Some(host);
            result.registrar_whois_raw = Some(registrar.raw);
            result.registrar_whois = Some(registrar.info);
        }

        debug!(
            domain = %domain,
            registry = %result.registry_whois_server,
            registrar = ?result.registrar_whois_server,
            "WHOIS lookup complete"
        );

        Ok(result)
    }
}
