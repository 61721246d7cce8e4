//! Subcommand handlers

use std::time::Duration;

use anyhow::{Context, bail};
use bunny_dns_provider::{Authenticator, CleanupOutcome, DnsProvider};

use crate::cli::Challenge;

/// Publish the challenge, then hold until resolvers can be expected to see it.
pub async fn auth(
    authenticator: &Authenticator,
    challenge: &Challenge,
    propagation: Duration,
) -> anyhow::Result<()> {
    authenticator
        .publish(
            &challenge.domain,
            &challenge.validation_name,
            &challenge.value,
        )
        .await
        .context("publishing challenge record")?;

    if propagation.is_zero() {
        tracing::debug!("Propagation wait disabled");
    } else {
        tracing::info!(
            "Waiting {}s for {} to propagate",
            propagation.as_secs(),
            challenge.validation_name
        );
        tokio::time::sleep(propagation).await;
    }

    Ok(())
}

pub async fn cleanup(
    authenticator: &Authenticator,
    challenge: &Challenge,
) -> anyhow::Result<CleanupOutcome> {
    let outcome = authenticator
        .cleanup(
            &challenge.domain,
            &challenge.validation_name,
            &challenge.value,
        )
        .await
        .context("removing challenge record")?;

    match outcome {
        CleanupOutcome::Deleted { .. } => {}
        CleanupOutcome::ZoneMissing => {
            tracing::warn!("No zone for {}; nothing to remove", challenge.domain);
        }
        CleanupOutcome::RecordMissing => {
            tracing::warn!(
                "No TXT record {} with the given value; nothing to remove",
                challenge.validation_name
            );
        }
    }

    Ok(outcome)
}

/// Verify the key, then report how many zones it can see.
pub async fn check(provider: &dyn DnsProvider) -> anyhow::Result<usize> {
    if !provider
        .validate_credentials()
        .await
        .context("validating access key")?
    {
        bail!("access key rejected by {}", provider.id());
    }

    let zones = provider.list_zones().await.context("listing zones")?;
    for zone in &zones {
        tracing::debug!(
            "Zone {} ({}), {} record(s)",
            zone.domain,
            zone.id,
            zone.records.len()
        );
    }
    Ok(zones.len())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bunny_dns_provider::{
        AuthenticatorConfig, CreateTxtRecordRequest, DnsRecord, DnsZone, ProviderError, Result,
    };

    use super::*;

    /// In-memory account with a single zone.
    struct FakeAccount {
        zones: Mutex<Vec<DnsZone>>,
        next_id: Mutex<i64>,
        reject_key: bool,
    }

    impl FakeAccount {
        fn with_zone(domain: &str) -> Self {
            Self {
                zones: Mutex::new(vec![DnsZone {
                    id: 1,
                    domain: domain.to_string(),
                    records: Vec::new(),
                }]),
                next_id: Mutex::new(100),
                reject_key: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                reject_key: true,
                ..Self::with_zone("example.com")
            }
        }

        fn txt_count(&self) -> usize {
            self.zones.lock().unwrap()[0].records.len()
        }
    }

    #[async_trait]
    impl DnsProvider for FakeAccount {
        fn id(&self) -> &'static str {
            "fake"
        }

        async fn list_zones(&self) -> Result<Vec<DnsZone>> {
            if self.reject_key {
                return Err(ProviderError::InvalidCredentials {
                    provider: "fake".to_string(),
                    raw_message: Some("denied".to_string()),
                });
            }
            Ok(self.zones.lock().unwrap().clone())
        }

        async fn create_txt_record(
            &self,
            zone_id: i64,
            req: &CreateTxtRecordRequest,
        ) -> Result<()> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let mut zones = self.zones.lock().unwrap();
            let zone = zones.iter_mut().find(|z| z.id == zone_id).unwrap();
            zone.records.push(DnsRecord {
                id: *next_id,
                name: req.name.clone(),
                record_type: req.record_type,
                value: req.value.clone(),
                ttl: req.ttl,
            });
            Ok(())
        }

        async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()> {
            let mut zones = self.zones.lock().unwrap();
            let zone = zones.iter_mut().find(|z| z.id == zone_id).unwrap();
            zone.records.retain(|r| r.id != record_id);
            Ok(())
        }
    }

    fn challenge(domain: &str) -> Challenge {
        Challenge {
            domain: domain.to_string(),
            validation_name: format!("_acme-challenge.{domain}"),
            value: "token".to_string(),
        }
    }

    fn setup(account: FakeAccount) -> (Arc<FakeAccount>, Authenticator) {
        let account = Arc::new(account);
        let auth = Authenticator::new(AuthenticatorConfig::default(), account.clone());
        (account, auth)
    }

    #[tokio::test]
    async fn auth_then_cleanup() {
        let (account, authenticator) = setup(FakeAccount::with_zone("example.com"));
        let challenge = challenge("www.example.com");

        auth(&authenticator, &challenge, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(account.txt_count(), 1);
        assert!(account.zones.lock().unwrap()[0].records[0].is_txt("_acme-challenge.www", "token"));

        let outcome = cleanup(&authenticator, &challenge).await.unwrap();
        assert!(matches!(outcome, CleanupOutcome::Deleted { zone_id: 1, .. }));
        assert_eq!(account.txt_count(), 0);

        let again = cleanup(&authenticator, &challenge).await.unwrap();
        assert_eq!(again, CleanupOutcome::RecordMissing);
    }

    #[tokio::test]
    async fn auth_fails_for_unknown_zone() {
        let (account, authenticator) = setup(FakeAccount::with_zone("example.org"));

        let err = auth(&authenticator, &challenge("example.com"), Duration::ZERO)
            .await
            .unwrap_err();

        let chain = format!("{err:#}");
        assert!(chain.contains("publishing challenge record"));
        assert_eq!(chain.matches("Domain 'example.com' not found").count(), 1);
        assert_eq!(account.txt_count(), 0);
    }

    #[tokio::test]
    async fn cleanup_unknown_zone_is_ok() {
        let (_, authenticator) = setup(FakeAccount::with_zone("example.org"));

        let outcome = cleanup(&authenticator, &challenge("example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, CleanupOutcome::ZoneMissing);
    }

    #[tokio::test]
    async fn check_counts_zones() {
        let account = FakeAccount::with_zone("example.com");
        assert_eq!(check(&account).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn check_reports_rejected_key() {
        let err = check(&FakeAccount::rejecting()).await.unwrap_err();
        assert_eq!(err.to_string(), "access key rejected by fake");
    }
}
