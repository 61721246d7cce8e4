//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::BunnyProvider;
use crate::traits::DnsProvider;
use crate::types::BunnyCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` so it can be
/// handed to a [`RecordReconciler`](crate::RecordReconciler) or an
/// [`Authenticator`](crate::Authenticator).
///
/// # Examples
///
/// ```rust,no_run
/// use bunny_dns_provider::{create_provider, BunnyCredentials};
///
/// let provider = create_provider(BunnyCredentials::new("your-access-key")).unwrap();
/// ```
pub fn create_provider(credentials: BunnyCredentials) -> Result<Arc<dyn DnsProvider>> {
    Ok(Arc::new(BunnyProvider::new(credentials)?))
}
