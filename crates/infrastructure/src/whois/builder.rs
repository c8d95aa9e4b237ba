use super::parser::KeyValueWhoisParser;
use super::transport::TcpWhoisTransport;
use ferrous_whois_application::ports::{WhoisParser, WhoisTransport};
use ferrous_whois_application::WhoisLookup;
use ferrous_whois_domain::WhoisConfig;
use std::sync::Arc;
use tracing::debug;

/// Wires transport, parser and configuration into a shared [`WhoisLookup`].
///
/// Defaults to [`TcpWhoisTransport`] and [`KeyValueWhoisParser`].
pub struct WhoisLookupBuilder {
    config: WhoisConfig,
    transport: Option<Arc<dyn WhoisTransport>>,
    parser: Option<Arc<dyn WhoisParser>>,
}

impl WhoisLookupBuilder {
    pub fn new(config: WhoisConfig) -> Self {
        Self {
            config,
            transport: None,
            parser: None,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn WhoisTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn WhoisParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn build(self) -> Arc<WhoisLookup> {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(TcpWhoisTransport::new()));
        let parser = self
            .parser
            .unwrap_or_else(|| Arc::new(KeyValueWhoisParser::new()));

        let lookup = WhoisLookup::new(self.config, transport, parser);

        debug!(
            root_server = %lookup.config().whois_tld_server,
            cache_ms = lookup.config().root_cache_duration_ms,
            timeout_ms = lookup.config().default_timeout_ms,
            local_addr = ?lookup.local_addr(),
            "WHOIS lookup initialized"
        );

        Arc::new(lookup)
    }
}

impl Default for WhoisLookupBuilder {
    fn default() -> Self {
        Self::new(WhoisConfig::default())
    }
}
