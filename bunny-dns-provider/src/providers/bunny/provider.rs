//! bunny.net DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, ProviderErrorMapper, RawApiError};
use crate::types::{CreateTxtRecordRequest, DnsZone, ZoneListPayload};

use super::{BunnyProvider, MUTATION_SUCCESS_STATUS};

#[async_trait]
impl DnsProvider for BunnyProvider {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn list_zones(&self) -> Result<Vec<DnsZone>> {
        match self.fetch_zone_payload().await? {
            ZoneListPayload::Zones(zones) => Ok(zones),
            ZoneListPayload::Page {
                items,
                has_more_items,
            } => {
                if has_more_items {
                    log::warn!(
                        "[{}] Zone listing is paged; only the first {} zones are searched",
                        self.provider_name(),
                        items.len()
                    );
                }
                Ok(items)
            }
            ZoneListPayload::Error(envelope) => {
                log::error!(
                    "[{}] Zone listing rejected: {}",
                    self.provider_name(),
                    envelope.message
                );
                let raw = match envelope.error_key {
                    Some(key) => RawApiError::with_code(key, envelope.message),
                    None => RawApiError::new(envelope.message),
                };
                Err(self.map_error(raw))
            }
        }
    }

    async fn create_txt_record(&self, zone_id: i64, req: &CreateTxtRecordRequest) -> Result<()> {
        let response = self.put(&Self::records_path(zone_id), req).await?;

        if response.status != MUTATION_SUCCESS_STATUS {
            return Err(ProviderError::RecordWriteFailed {
                provider: self.provider_name().to_string(),
                zone_id,
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }

    async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()> {
        let response = self.delete(&Self::record_path(zone_id, record_id)).await?;

        if response.status != MUTATION_SUCCESS_STATUS {
            return Err(ProviderError::RecordDeleteFailed {
                provider: self.provider_name().to_string(),
                zone_id,
                record_id,
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}
