use std::fmt;
use thiserror::Error;

/// Step of a lookup that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    TldServer,
    RegistryQuery,
    RegistryParse,
    RegistrarQuery,
    RegistrarParse,
}

impl LookupStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TldServer => "failed to retrieve tld whois server",
            Self::RegistryQuery => "failed to query tld/registry whois server",
            Self::RegistryParse => "failed to parse whois registry response",
            Self::RegistrarQuery => "failed to query registrar whois server",
            Self::RegistrarParse => "failed to parse whois registrar response",
        }
    }
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat classification of a [`DomainError`], with stage wrappers removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    DialFailure,
    WriteFailure,
    ReadFailure,
    ServerNotFound,
    ParseFailure,
    MissingDomainSection,
    MissingReferralServer,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Failed to connect to {server}: {message}")]
    DialFailed { server: String, message: String },

    #[error("Failed to send query to {server}: {message}")]
    WriteFailed { server: String, message: String },

    #[error("Failed to read response from {server}: {message}")]
    ReadFailed { server: String, message: String },

    #[error("WHOIS server not found for TLD: {tld}")]
    ServerNotFound {
        tld: String,
        #[source]
        cause: Option<Box<DomainError>>,
    },

    #[error("Failed to parse WHOIS response: {0}")]
    ParseFailed(String),

    #[error("Registry whois response missing domain")]
    RegistryMissingDomain,

    #[error("Registry whois response missing whois server")]
    RegistryMissingWhoisServer,

    #[error("{stage}: {source}")]
    Stage {
        stage: LookupStage,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Wraps `self` with the lookup stage that produced it.
    pub fn at(self, stage: LookupStage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDomainName(_) => ErrorKind::InvalidInput,
            Self::DialFailed { .. } => ErrorKind::DialFailure,
            Self::WriteFailed { .. } => ErrorKind::WriteFailure,
            Self::ReadFailed { .. } => ErrorKind::ReadFailure,
            Self::ServerNotFound { .. } => ErrorKind::ServerNotFound,
            Self::ParseFailed(_) => ErrorKind::ParseFailure,
            Self::RegistryMissingDomain => ErrorKind::MissingDomainSection,
            Self::RegistryMissingWhoisServer => ErrorKind::MissingReferralServer,
            Self::Stage { source, .. } => source.kind(),
        }
    }

    /// Outermost stage recorded on this error, if any.
    pub fn stage(&self) -> Option<LookupStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Transport-level failures, useful to decide whether a caller retries.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DialFailure | ErrorKind::WriteFailure | ErrorKind::ReadFailure
        )
    }

    /// Soft conditions are reported next to valid data.
    pub fn is_soft(&self) -> bool {
        self.kind() == ErrorKind::MissingReferralServer
    }
}
