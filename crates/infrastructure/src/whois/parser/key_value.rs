use ferrous_whois_application::ports::WhoisParser;
use ferrous_whois_domain::{Contact, DomainError, DomainInfo, WhoisInfo};

use super::dates::parse_date;

const NOT_FOUND_MARKERS: &[&str] = &[
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "no matching record",
    "the queried object does not exist",
    "status: free",
    "status: available",
];

const LIMIT_MARKERS: &[&str] = &[
    "limit exceeded",
    "query rate limit",
    "quota exceeded",
    "too many requests",
    "exceeded the query limit",
];

const RESERVED_MARKERS: &[&str] = &["reserved domain name", "this name is reserved"];

#[derive(Clone, Copy)]
enum Role {
    Registrant,
    Administrative,
    Technical,
    Billing,
}

/// Parser for the common `Key: Value` WHOIS layouts (ICANN gTLD format and
/// the `nserver:`/`changed:` style used by many ccTLD registries).
///
/// Unknown keys are ignored. Text after the `>>> Last update` banner is
/// legal boilerplate and is not parsed.
#[derive(Debug, Clone, Default)]
pub struct KeyValueWhoisParser;

impl KeyValueWhoisParser {
    pub fn new() -> Self {
        Self
    }
}

impl WhoisParser for KeyValueWhoisParser {
    fn parse(&self, raw: &str) -> Result<WhoisInfo, DomainError> {
        if raw.trim().is_empty() {
            return Err(DomainError::ParseFailed("domain whois data is invalid".to_string()));
        }
        check_rejections(raw)?;

        let mut record = RecordBuilder::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.starts_with(">>>") {
                break;
            }
            if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                if !value.is_empty() {
                    record.apply(&normalize_key(key), value);
                }
            }
        }

        record
            .finish()
            .ok_or_else(|| DomainError::ParseFailed("domain whois data is invalid".to_string()))
    }
}

fn check_rejections(raw: &str) -> Result<(), DomainError> {
    for line in raw.lines() {
        let lower = line.trim().to_lowercase();
        if lower.starts_with(">>>") {
            break;
        }
        if lower.starts_with('%') || lower.starts_with('#') {
            // Comment banners often quote these phrases as examples.
            continue;
        }
        if LIMIT_MARKERS.iter().any(|m| lower.contains(m)) {
            return Err(DomainError::ParseFailed(
                "domain query limit exceeded".to_string(),
            ));
        }
        if RESERVED_MARKERS.iter().any(|m| lower.contains(m)) {
            return Err(DomainError::ParseFailed(
                "domain is reserved to register".to_string(),
            ));
        }
        if NOT_FOUND_MARKERS.iter().any(|m| lower.starts_with(m)) {
            return Err(DomainError::ParseFailed("domain is not found".to_string()));
        }
    }
    Ok(())
}

/// Lowercase, collapse whitespace, drop `_`/`-` separators and brackets.
fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_start_matches(['[', ' '])
        .trim_end_matches(']')
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Default)]
struct RecordBuilder {
    domain: DomainInfo,
    registrar: Contact,
    registrant: Contact,
    administrative: Contact,
    technical: Contact,
    billing: Contact,
    matched: bool,
}

impl RecordBuilder {
    fn apply(&mut self, key: &str, value: &str) {
        let matched = self.apply_domain(key, value)
            || self.apply_registrar(key, value)
            || self.apply_role(key, value);
        self.matched |= matched;
    }

    fn apply_domain(&mut self, key: &str, value: &str) -> bool {
        let domain = &mut self.domain;
        match key {
            "domain name" | "domain" | "domainname" => {
                set_once(&mut domain.domain, &value.to_lowercase());
            }
            "registry domain id" | "domain id" | "roid" => set_once(&mut domain.id, value),
            "registrar whois server" | "whois server" | "whois" => {
                set_once(&mut domain.whois_server, value)
            }
            "name server" | "name servers" | "nameserver" | "nameservers" | "nserver" => {
                if let Some(ns) = value.split_whitespace().next() {
                    push_unique(&mut domain.name_servers, ns.trim_end_matches('.').to_lowercase());
                }
            }
            "domain status" | "status" | "state" => {
                if let Some(status) = value.split_whitespace().next() {
                    push_unique(&mut domain.status, status.trim_end_matches(',').to_string());
                }
            }
            "dnssec" => {
                let lower = value.to_lowercase();
                domain.dnssec = lower.starts_with("signed") || lower == "yes" || lower == "active";
            }
            "creation date" | "created" | "created on" | "created date" | "registered"
            | "registered on" | "registration date" | "registration time"
            | "domain registration date" => set_once(&mut domain.created_date, value),
            "updated date" | "last updated" | "last modified" | "last update" | "changed"
            | "modified" | "updated" => set_once(&mut domain.updated_date, value),
            "registry expiry date" | "registrar registration expiration date"
            | "expiration date" | "expiry date" | "expires" | "expires on" | "expire date"
            | "expiration time" | "paid till" => set_once(&mut domain.expiration_date, value),
            _ => return false,
        }
        true
    }

    fn apply_registrar(&mut self, key: &str, value: &str) -> bool {
        let registrar = &mut self.registrar;
        match key {
            "registrar" | "registrar name" | "sponsoring registrar" => {
                set_once(&mut registrar.name, value)
            }
            "registrar iana id" => set_once(&mut registrar.id, value),
            "registrar url" | "referral url" => set_once(&mut registrar.referral_url, value),
            "registrar abuse contact email" => set_once(&mut registrar.email, value),
            "registrar abuse contact phone" => set_once(&mut registrar.phone, value),
            _ => return false,
        }
        true
    }

    fn apply_role(&mut self, key: &str, value: &str) -> bool {
        let Some((role, field)) = split_role(key) else {
            return false;
        };
        let contact = match role {
            Role::Registrant => &mut self.registrant,
            Role::Administrative => &mut self.administrative,
            Role::Technical => &mut self.technical,
            Role::Billing => &mut self.billing,
        };
        apply_contact_field(contact, field, value)
    }

    fn finish(mut self) -> Option<WhoisInfo> {
        if !self.matched {
            return None;
        }

        let domain = if self.domain == DomainInfo::default() {
            None
        } else {
            fill_domain_derived(&mut self.domain);
            Some(self.domain)
        };

        Some(WhoisInfo {
            domain,
            registrar: non_empty(self.registrar),
            registrant: non_empty(self.registrant),
            administrative: non_empty(self.administrative),
            technical: non_empty(self.technical),
            billing: non_empty(self.billing),
        })
    }
}

fn split_role(key: &str) -> Option<(Role, &str)> {
    let key = key.strip_prefix("registry ").unwrap_or(key);
    let (prefix, field) = key.split_once(' ')?;
    let role = match prefix {
        "registrant" | "owner" | "holder" => Role::Registrant,
        "admin" | "administrative" => Role::Administrative,
        "tech" | "technical" => Role::Technical,
        "billing" => Role::Billing,
        _ => return None,
    };
    let field = field.strip_prefix("contact ").unwrap_or(field);
    Some((role, field))
}

fn apply_contact_field(contact: &mut Contact, field: &str, value: &str) -> bool {
    match field {
        "id" | "handle" => set_once(&mut contact.id, value),
        "name" => set_once(&mut contact.name, value),
        "organization" | "organisation" | "org" => set_once(&mut contact.organization, value),
        "street" | "address" => match contact.street.as_mut() {
            Some(street) => {
                street.push_str(", ");
                street.push_str(value);
            }
            None => contact.street = Some(value.to_string()),
        },
        "city" => set_once(&mut contact.city, value),
        "state/province" | "state" | "province" => set_once(&mut contact.province, value),
        "postal code" | "postalcode" | "zip" => set_once(&mut contact.postal_code, value),
        "country" | "country code" => set_once(&mut contact.country, value),
        "phone" => set_once(&mut contact.phone, value),
        "phone ext" => set_once(&mut contact.phone_ext, value),
        "fax" => set_once(&mut contact.fax, value),
        "fax ext" => set_once(&mut contact.fax_ext, value),
        "email" | "e mail" => set_once(&mut contact.email, value),
        _ => return false,
    }
    true
}

fn fill_domain_derived(domain: &mut DomainInfo) {
    if let Some(name) = domain.domain.clone() {
        if let Some((label, extension)) = name.split_once('.') {
            domain.name.get_or_insert_with(|| label.to_string());
            domain.extension.get_or_insert_with(|| extension.to_string());
        }
        if name.split('.').any(|label| label.starts_with("xn--")) {
            domain.punycode.get_or_insert(name);
        }
    }

    domain.created_date_in_time = domain.created_date.as_deref().and_then(parse_date);
    domain.updated_date_in_time = domain.updated_date.as_deref().and_then(parse_date);
    domain.expiration_date_in_time = domain.expiration_date.as_deref().and_then(parse_date);
}

fn set_once(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

fn non_empty(contact: Contact) -> Option<Contact> {
    if contact.is_empty() {
        None
    } else {
        Some(contact)
    }
}
