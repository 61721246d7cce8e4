//! # bunny-dns-provider
//!
//! DNS-01 challenge fulfillment against the [bunny.net](https://bunny.net) DNS API.
//!
//! Given the domain being certified, the validation hostname and the challenge
//! token, the crate finds the owning zone in the account, publishes a TXT record,
//! and later removes exactly that record. Certificate issuance, propagation
//! polling and retries belong to the calling ACME client.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bunny_dns_provider::{Authenticator, AuthenticatorConfig, BunnyCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Authenticator::from_credentials(
//!         AuthenticatorConfig::default(),
//!         BunnyCredentials::new("your-access-key"),
//!     )?;
//!
//!     // 1. Publish the challenge
//!     auth.publish("www.example.com", "_acme-challenge.www.example.com", "token")
//!         .await?;
//!
//!     // 2. ... the ACME client validates ...
//!
//!     // 3. Remove it again
//!     auth.cleanup("www.example.com", "_acme-challenge.www.example.com", "token")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Zone Resolution
//!
//! The zone is the last two labels of the domain (`www.example.com` →
//! `example.com`), matched exactly against the account's zone list. The record
//! name is what precedes those two labels in the validation name
//! (`_acme-challenge.www`). See [`hostname`].
//!
//! ## Error Handling
//!
//! Lower layers return [`Result<T, ProviderError>`](ProviderError); the
//! [`Authenticator`] wraps them into [`ChallengeError`]:
//!
//! - [`ProviderError::InvalidCredentials`] — the access key was rejected
//! - [`ProviderError::DomainNotFound`] — no zone for the registrable domain (publish only)
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] — API unreachable
//! - [`ProviderError::RecordWriteFailed`] / [`ProviderError::RecordDeleteFailed`] — mutation rejected
//!
//! Cleanup treats a missing zone or record as success.

mod authenticator;
mod error;
mod factory;
pub mod hostname;
mod http_client;
mod providers;
mod reconciler;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{ChallengeError, ChallengeOperation, ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export public traits (error mapping stays internal)
pub use traits::{DnsProvider, HttpTransport};

// Re-export transport types
pub use http_client::{ApiRequest, ApiResponse, ReqwestTransport};

// Re-export types
pub use types::{
    ApiErrorEnvelope, AuthenticatorConfig, BunnyCredentials, CreateTxtRecordRequest,
    DEFAULT_API_BASE, DEFAULT_CHALLENGE_TTL, DnsRecord, DnsRecordType, DnsZone, ZoneListPayload,
};

// Re-export components
pub use authenticator::Authenticator;
pub use hostname::{ValidationTarget, extract_registrable_domain, split_record_name};
pub use providers::BunnyProvider;
pub use reconciler::{CleanupOutcome, RecordReconciler};

// Re-export log helpers
pub use utils::log_sanitizer::mask_secret;
