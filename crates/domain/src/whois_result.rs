use serde::{Deserialize, Serialize};

use crate::{DomainError, WhoisInfo};

/// What the registrar stage did with the registry's referral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referral {
    /// Registry-only lookup; no referral was looked at.
    NotRequested,
    /// The registry referred to this host and it was queried.
    Followed(String),
    /// The registry record carried no referral host.
    Missing,
}

/// Parsed record together with the raw text and the server that produced it.
#[derive(Debug, Clone)]
pub struct RecordLookup {
    pub info: WhoisInfo,
    pub raw: String,
    pub server: String,
    pub referral: Referral,
}

impl RecordLookup {
    /// Soft condition reported alongside still-valid data.
    pub fn soft_error(&self) -> Option<DomainError> {
        match self.referral {
            Referral::Missing => Some(DomainError::RegistryMissingWhoisServer),
            _ => None,
        }
    }
}

/// Registrar-aggregating lookup result. Raw text is kept next to each parsed
/// record so callers can re-parse or audit what each server returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhoisResult {
    pub domain: String,
    pub tld: String,
    pub registry_whois_server: String,
    pub registry_whois_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_whois: Option<WhoisInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_whois_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_whois: Option<WhoisInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_whois_raw: Option<String>,
}

impl WhoisResult {
    /// Most specific record available: the registrar's when the referral was
    /// followed, otherwise the registry's.
    pub fn best_record(&self) -> Option<&WhoisInfo> {
        self.registrar_whois
            .as_ref()
            .or(self.registry_whois.as_ref())
    }

    pub fn soft_error(&self) -> Option<DomainError> {
        if self.registry_whois.is_some() && self.registrar_whois_raw.is_none() {
            Some(DomainError::RegistryMissingWhoisServer)
        } else {
            None
        }
    }
}
