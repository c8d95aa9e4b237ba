use crate::DomainError;

/// Returns the TLD of `domain`: its final dot-separated label.
///
/// Names with fewer than two labels are rejected before any network access.
pub fn split_tld(domain: &str) -> Result<&str, DomainError> {
    let mut labels = domain.rsplit('.');
    match (labels.next(), labels.next()) {
        (Some(tld), Some(_)) => Ok(tld),
        _ => Err(DomainError::InvalidDomainName(domain.to_string())),
    }
}

/// Builds the `host:port` endpoint for a registry or registrar host.
pub fn whois_endpoint(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
