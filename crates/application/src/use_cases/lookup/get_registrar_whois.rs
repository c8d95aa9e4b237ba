use ferrous_whois_domain::{DomainError, LookupStage, RecordLookup, Referral, WhoisInfo};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::services::RecordFetcher;
use crate::use_cases::GetRegistryWhoisUseCase;

/// What to do once the registry record is parsed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum NextHop {
    Done,
    Registrar(String),
}

/// Decide the next hop from a parsed registry record. A record with no
/// domain section is an error, not a silent fallback.
pub(crate) fn next_hop(registry: &WhoisInfo) -> Result<NextHop, DomainError> {
    let domain = registry
        .domain
        .as_ref()
        .ok_or(DomainError::RegistryMissingDomain)?;

    Ok(match domain.referral_server() {
        Some(host) => NextHop::Registrar(host.to_string()),
        None => NextHop::Done,
    })
}

/// Registry lookup followed by at most one registrar referral.
///
/// Registrar records usually carry full contact details, at the cost of a
/// second round trip.
pub struct GetRegistrarWhoisUseCase {
    get_registry_whois: Arc<GetRegistryWhoisUseCase>,
    fetcher: Arc<RecordFetcher>,
}

impl GetRegistrarWhoisUseCase {
    pub fn new(get_registry_whois: Arc<GetRegistryWhoisUseCase>, fetcher: Arc<RecordFetcher>) -> Self {
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
    ) -> Result<RecordLookup, DomainError> {
        let registry = self.get_registry_whois.execute(domain, local_addr).await?;

        match next_hop(&registry.info)? {
            NextHop::Done => {
                debug!(domain = %domain, server = %registry.server, "Registry response has no registrar referral");
                Ok(RecordLookup {
                    referral: Referral::Missing,
                    ..registry
                })
            }
            NextHop::Registrar(host) => {
                let fetched = self
                    .fetcher
                    .fetch(
                        &host,
                        domain,
                        local_addr,
                        LookupStage::RegistrarQuery,
                        LookupStage::RegistrarParse,
                    )
                    .await?;

                debug!(domain = %domain, registry = %registry.server, registrar = %host, "Registrar record parsed");

                Ok(RecordLookup {
                    info: fetched.info,
                    raw: fetched.raw,
                    server: host.clone(),
                    referral: Referral::Followed(host),
                })
            }
        }
    }
}
