use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::trace;

struct CachedTldServer {
    host: String,
    last_updated: Instant,
}

enum Probe {
    Fresh(String),
    Stale,
    Missing,
}

/// TLD → authoritative WHOIS host, as learned from the root server.
///
/// Entries are valid while younger than the freshness window. Staleness is
/// checked on read; entries are only ever overwritten, never removed, so the
/// map grows with the set of TLDs seen.
pub struct TldServerCache {
    entries: RwLock<HashMap<String, CachedTldServer>>,
    freshness: Duration,
}

impl TldServerCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            freshness,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Cached host for `tld`, if present and still fresh.
    pub fn lookup(&self, tld: &str) -> Option<String> {
        match self.probe(tld) {
            Probe::Fresh(host) => Some(host),
            Probe::Stale => {
                trace!(tld = %tld, "TLD server cache entry is stale");
                None
            }
            Probe::Missing => None,
        }
    }

    /// Overwrites the entry for `tld` with a fresh timestamp.
    pub fn store(&self, tld: &str, host: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            tld.to_string(),
            CachedTldServer {
                host: host.to_string(),
                last_updated: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn probe(&self, tld: &str) -> Probe {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(tld) {
            Some(entry) if entry.last_updated.elapsed() < self.freshness => {
                Probe::Fresh(entry.host.clone())
            }
            Some(_) => Probe::Stale,
            None => Probe::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_lookup() {
        let cache = TldServerCache::new(Duration::from_secs(3600));
        cache.store("org", "whois.pir.org");

        assert_eq!(cache.lookup("org").as_deref(), Some("whois.pir.org"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let cache = TldServerCache::new(Duration::from_secs(3600));
        cache.store("com", "whois.verisign-grs.com");

        assert!(cache.lookup("COM").is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let cache = TldServerCache::new(Duration::from_secs(3600));
        cache.store("net", "old.example");
        cache.store("net", "whois.verisign-grs.com");

        assert_eq!(cache.lookup("net").as_deref(), Some("whois.verisign-grs.com"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_window_never_serves() {
        let cache = TldServerCache::new(Duration::ZERO);
        cache.store("io", "whois.nic.io");

        assert!(cache.lookup("io").is_none());
        assert!(!cache.is_empty());
    }
}
