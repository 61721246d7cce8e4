//! Validation hostname decomposition
//!
//! Splits a validation hostname such as `_acme-challenge.www.example.com` into
//! the registrable domain to look up at the provider (`example.com`) and the
//! record name relative to that zone (`_acme-challenge.www`).
//!
//! The registrable domain is approximated as the last two labels; public suffix
//! rules (`co.uk` and friends) are not consulted. Labels are treated as opaque
//! ASCII, so punycode input passes through untouched.

use crate::error::{ProviderError, Result};

/// Number of trailing labels that make up a registrable domain.
const REGISTRABLE_LABELS: usize = 2;

fn labels(hostname: &str) -> Vec<&str> {
    hostname.trim_end_matches('.').split('.').collect()
}

/// Record name relative to the registrable domain.
///
/// `_acme-challenge.www.example.com` -> `_acme-challenge.www`.
/// Hostnames with two labels or fewer yield an empty name, which the provider
/// treats as the zone apex.
pub fn split_record_name(validation_name: &str) -> String {
    let labels = labels(validation_name);
    let keep = labels.len().saturating_sub(REGISTRABLE_LABELS);
    labels[..keep].join(".")
}

/// The last two labels of `domain`.
///
/// `_acme-challenge.www.example.com` -> `example.com`.
pub fn extract_registrable_domain(domain: &str) -> Result<String> {
    if domain.trim_end_matches('.').is_empty() {
        return Err(ProviderError::MalformedHostname {
            hostname: domain.to_string(),
        });
    }

    let labels = labels(domain);
    let skip = labels.len().saturating_sub(REGISTRABLE_LABELS);
    Ok(labels[skip..].join("."))
}

/// Where a challenge record lives: the zone to search for and the name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTarget {
    pub registrable_domain: String,
    pub record_name: String,
}

impl ValidationTarget {
    /// Decompose the orchestrator's `(domain, validation_name)` pair.
    ///
    /// The zone comes from `domain`, the relative name from `validation_name`.
    pub fn resolve(domain: &str, validation_name: &str) -> Result<Self> {
        Ok(Self {
            registrable_domain: extract_registrable_domain(domain)?,
            record_name: split_record_name(validation_name),
        })
    }
}
