//! TXT 记录协调
//!
//! 每次操作都重新列出全部 Zone（无缓存），随后最多发出一次变更请求。

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{CreateTxtRecordRequest, DnsZone};

/// Outcome of a cleanup that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The matching record was deleted.
    Deleted { zone_id: i64, record_id: i64 },
    /// No zone for the registrable domain; nothing to do.
    ZoneMissing,
    /// The zone exists but holds no matching TXT record.
    RecordMissing,
}

/// Finds the owning zone and publishes or removes challenge TXT records.
pub struct RecordReconciler {
    provider: Arc<dyn DnsProvider>,
}

/// First zone whose domain equals `registrable_domain` exactly.
///
/// At most one zone per registrable domain is expected; if the account ever
/// returns duplicates, the first one wins.
fn find_zone<'a>(zones: &'a [DnsZone], registrable_domain: &str) -> Option<&'a DnsZone> {
    zones.iter().find(|zone| zone.domain == registrable_domain)
}

impl RecordReconciler {
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Append a TXT record `relative_name = value` to the zone for `registrable_domain`.
    ///
    /// No existence check: publishing the same pair twice creates two records.
    pub async fn publish(
        &self,
        registrable_domain: &str,
        relative_name: &str,
        value: &str,
        ttl: u32,
    ) -> Result<()> {
        let zones = self.provider.list_zones().await?;
        log::debug!(
            "[{}] Searching {} zone(s) for '{registrable_domain}'",
            self.provider.id(),
            zones.len()
        );

        let Some(zone) = find_zone(&zones, registrable_domain) else {
            return Err(ProviderError::DomainNotFound {
                provider: self.provider.id().to_string(),
                domain: registrable_domain.to_string(),
                raw_message: Some("The domain could not be found under your account".to_string()),
            });
        };

        log::info!(
            "[{}] Creating TXT record '{relative_name}' in zone {} ({})",
            self.provider.id(),
            zone.domain,
            zone.id
        );
        let request = CreateTxtRecordRequest::new(relative_name, value, ttl);
        self.provider.create_txt_record(zone.id, &request).await
    }

    /// Delete the first TXT record `relative_name = value` in the zone for `registrable_domain`.
    ///
    /// A missing zone or record is not an error; failing to reach the provider is.
    pub async fn cleanup(
        &self,
        registrable_domain: &str,
        relative_name: &str,
        value: &str,
    ) -> Result<CleanupOutcome> {
        let zones = self.provider.list_zones().await?;

        let Some(zone) = find_zone(&zones, registrable_domain) else {
            log::warn!(
                "[{}] No zone for '{registrable_domain}', nothing to clean up",
                self.provider.id()
            );
            return Ok(CleanupOutcome::ZoneMissing);
        };

        let Some(record) = zone
            .records
            .iter()
            .find(|record| record.is_txt(relative_name, value))
        else {
            log::warn!(
                "[{}] No TXT record '{relative_name}' with the challenge value in zone {}",
                self.provider.id(),
                zone.domain
            );
            return Ok(CleanupOutcome::RecordMissing);
        };

        log::info!(
            "[{}] Deleting TXT record {} '{relative_name}' from zone {} ({})",
            self.provider.id(),
            record.id,
            zone.domain,
            zone.id
        );
        self.provider.delete_record(zone.id, record.id).await?;

        Ok(CleanupOutcome::Deleted {
            zone_id: zone.id,
            record_id: record.id,
        })
    }
}
