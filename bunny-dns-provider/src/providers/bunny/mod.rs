//! bunny.net DNS Provider

mod error;
mod http;
mod provider;

use std::sync::Arc;

use crate::error::Result;
use crate::http_client::ReqwestTransport;
use crate::traits::HttpTransport;
use crate::types::BunnyCredentials;

pub(crate) const PROVIDER_NAME: &str = "bunny";

/// Zone listing endpoint.
pub(crate) const ZONES_PATH: &str = "/dnszone/";

/// Status the API answers successful record mutations with.
pub(crate) const MUTATION_SUCCESS_STATUS: u16 = 204;

/// bunny.net DNS Provider
pub struct BunnyProvider {
    pub(crate) transport: Arc<dyn HttpTransport>,
}

impl BunnyProvider {
    /// Provider talking to the real API through reqwest.
    pub fn new(credentials: BunnyCredentials) -> Result<Self> {
        let transport = ReqwestTransport::new(credentials, PROVIDER_NAME)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Provider over any transport (proxies, tests).
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub(crate) fn records_path(zone_id: i64) -> String {
        format!("/dnszone/{zone_id}/records")
    }

    pub(crate) fn record_path(zone_id: i64, record_id: i64) -> String {
        format!("/dnszone/{zone_id}/records/{record_id}")
    }
}
