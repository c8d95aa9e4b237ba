use ferrous_whois_domain::{DomainError, RecordLookup, WhoisConfig, WhoisResult};
use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock};

use super::{RecordFetcher, TldServerCache};
use crate::ports::{WhoisParser, WhoisTransport};
use crate::use_cases::{
    GetRegistrarWhoisUseCase, GetRegistryWhoisUseCase, GetWhoisUseCase, ResolveTldServerUseCase,
};

/// Public entry point for WHOIS lookups.
///
/// One instance is meant to be shared (`Arc`) by every caller so they all
/// benefit from the same TLD server cache. Calls that pass no local address
/// use the instance default, which starts as `config.local_addr` and can be
/// changed at runtime with [`WhoisLookup::set_local_addr`].
pub struct WhoisLookup {
    config: WhoisConfig,
    cache: Arc<TldServerCache>,
    local_addr: RwLock<Option<SocketAddr>>,
    resolve_tld_server: Arc<ResolveTldServerUseCase>,
    get_registry_whois: Arc<GetRegistryWhoisUseCase>,
    get_registrar_whois: GetRegistrarWhoisUseCase,
    get_whois: GetWhoisUseCase,
}

impl WhoisLookup {
    pub fn new(
        config: WhoisConfig,
        transport: Arc<dyn WhoisTransport>,
        parser: Arc<dyn WhoisParser>,
    ) -> Self {
        let config = config.merged_with_defaults();
        let cache = Arc::new(TldServerCache::new(config.root_cache_duration()));

        let resolve_tld_server = Arc::new(ResolveTldServerUseCase::new(
            transport.clone(),
            cache.clone(),
            config.whois_tld_server.clone(),
            config.default_timeout(),
        ));
        let fetcher = Arc::new(RecordFetcher::new(
            transport,
            parser,
            config.whois_port,
            config.default_timeout(),
        ));
        let get_registry_whois = Arc::new(GetRegistryWhoisUseCase::new(
            resolve_tld_server.clone(),
            fetcher.clone(),
        ));
        let get_registrar_whois =
            GetRegistrarWhoisUseCase::new(get_registry_whois.clone(), fetcher.clone());
        let get_whois = GetWhoisUseCase::new(get_registry_whois.clone(), fetcher);

        Self {
            local_addr: RwLock::new(config.local_addr),
            config,
            cache,
            resolve_tld_server,
            get_registry_whois,
            get_registrar_whois,
            get_whois,
        }
    }

    pub fn config(&self) -> &WhoisConfig {
        &self.config
    }

    pub fn cache(&self) -> &TldServerCache {
        &self.cache
    }

    /// Default local address for outbound connections.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_local_addr(&self, local_addr: Option<SocketAddr>) {
        *self.local_addr.write().unwrap_or_else(PoisonError::into_inner) = local_addr;
    }

    /// WHOIS server for `tld`.
    pub async fn get_tld_whois_server(&self, tld: &str) -> Result<String, DomainError> {
        self.get_tld_whois_server_with_local_addr(tld, None).await
    }

    pub async fn get_tld_whois_server_with_local_addr(
        &self,
        tld: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<String, DomainError> {
        self.resolve_tld_server
            .execute(tld, self.bind_addr(local_addr))
            .await
    }

    /// Record as published by the TLD registry.
    pub async fn get_registry_whois(&self, domain: &str) -> Result<RecordLookup, DomainError> {
        self.get_registry_whois_with_local_addr(domain, None).await
    }

    pub async fn get_registry_whois_with_local_addr(
        &self,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<RecordLookup, DomainError> {
        self.get_registry_whois
            .execute(domain, self.bind_addr(local_addr))
            .await
    }

    /// Record from the registrar the registry refers to, or the registry
    /// record when there is no referral (see [`RecordLookup::soft_error`]).
    pub async fn get_registrar_whois(&self, domain: &str) -> Result<RecordLookup, DomainError> {
        self.get_registrar_whois_with_local_addr(domain, None).await
    }

    pub async fn get_registrar_whois_with_local_addr(
        &self,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<RecordLookup, DomainError> {
        self.get_registrar_whois
            .execute(domain, self.bind_addr(local_addr))
            .await
    }

    /// Registry and registrar records with their raw text and servers.
    pub async fn get_whois(&self, domain: &str) -> Result<WhoisResult, DomainError> {
        self.get_whois_with_local_addr(domain, None).await
    }

    pub async fn get_whois_with_local_addr(
        &self,
        domain: &str,
        local_addr: Option<SocketAddr>,
    ) -> Result<WhoisResult, DomainError> {
        self.get_whois
            .execute(domain, self.bind_addr(local_addr))
            .await
    }

    fn bind_addr(&self, local_addr: Option<SocketAddr>) -> Option<SocketAddr> {
        local_addr.or_else(|| self.local_addr())
    }
}
