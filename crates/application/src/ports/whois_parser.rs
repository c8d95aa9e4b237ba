use ferrous_whois_domain::{DomainError, WhoisInfo};

/// Turns raw WHOIS text into a structured record.
///
/// Rejections are reported as [`DomainError::ParseFailed`].
pub trait WhoisParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<WhoisInfo, DomainError>;
}
