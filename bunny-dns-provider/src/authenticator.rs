//! DNS-01 challenge authenticator
//!
//! Entry point for an ACME orchestrator: decomposes the validation name,
//! hands the work to [`RecordReconciler`] and wraps every failure into a
//! [`ChallengeError`].

use std::sync::Arc;

use crate::error::{ChallengeError, ChallengeOperation, Result};
use crate::factory::create_provider;
use crate::hostname::ValidationTarget;
use crate::reconciler::{CleanupOutcome, RecordReconciler};
use crate::traits::DnsProvider;
use crate::types::{AuthenticatorConfig, BunnyCredentials};

/// Publishes and removes DNS-01 challenge records.
pub struct Authenticator {
    config: AuthenticatorConfig,
    reconciler: RecordReconciler,
}

impl Authenticator {
    pub fn new(config: AuthenticatorConfig, provider: Arc<dyn DnsProvider>) -> Self {
        Self {
            config,
            reconciler: RecordReconciler::new(provider),
        }
    }

    /// Authenticator against the bunny.net API.
    pub fn from_credentials(
        config: AuthenticatorConfig,
        credentials: BunnyCredentials,
    ) -> Result<Self> {
        Ok(Self::new(config, create_provider(credentials)?))
    }

    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    /// Publish `value` as a TXT record for `validation_name`.
    ///
    /// `domain` selects the zone, `validation_name` the record inside it.
    pub async fn publish(
        &self,
        domain: &str,
        validation_name: &str,
        value: &str,
    ) -> std::result::Result<(), ChallengeError> {
        let wrap = |e| ChallengeError::new(ChallengeOperation::Publish, validation_name, e);

        let target = ValidationTarget::resolve(domain, validation_name).map_err(wrap)?;
        self.reconciler
            .publish(
                &target.registrable_domain,
                &target.record_name,
                value,
                self.config.ttl,
            )
            .await
            .map_err(wrap)?;

        log::info!("Published challenge record for {validation_name}");
        Ok(())
    }

    /// Remove the TXT record published for `validation_name` with `value`.
    ///
    /// A zone or record that is already gone counts as success.
    pub async fn cleanup(
        &self,
        domain: &str,
        validation_name: &str,
        value: &str,
    ) -> std::result::Result<CleanupOutcome, ChallengeError> {
        let wrap = |e| ChallengeError::new(ChallengeOperation::Cleanup, validation_name, e);

        let target = ValidationTarget::resolve(domain, validation_name).map_err(wrap)?;
        let outcome = self
            .reconciler
            .cleanup(&target.registrable_domain, &target.record_name, value)
            .await
            .map_err(wrap)?;

        log::info!("Cleaned up challenge record for {validation_name}: {outcome:?}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::error::ProviderError;
    use crate::test_utils::{MockTransport, auth_failure, mock_provider, txt_record, zone};

    fn authenticator(transport: MockTransport) -> (Arc<MockTransport>, Authenticator) {
        let (transport, provider) = mock_provider(transport);
        (
            transport,
            Authenticator::new(AuthenticatorConfig::default(), Arc::new(provider)),
        )
    }

    #[tokio::test]
    async fn publish_decomposes_and_uses_default_ttl() {
        let (transport, auth) = authenticator(
            MockTransport::new()
                .respond_json(200, &json!([zone(9, "example.com", vec![])]))
                .respond(204, ""),
        );

        auth.publish(
            "www.example.com",
            "_acme-challenge.www.example.com",
            "token-value",
        )
        .await
        .unwrap();

        let put = &transport.requests()[1];
        assert_eq!(put.method, Method::PUT);
        assert_eq!(put.path, "/dnszone/9/records");
        let body: serde_json::Value = serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["Name"], "_acme-challenge.www");
        assert_eq!(body["Value"], "token-value");
        assert_eq!(body["Ttl"], 60);
        assert_eq!(body["Type"], 3);
    }

    #[tokio::test]
    async fn publish_uses_configured_ttl() {
        let (transport, provider) = mock_provider(
            MockTransport::new()
                .respond_json(200, &json!([zone(9, "example.com", vec![])]))
                .respond(204, ""),
        );
        let auth = Authenticator::new(AuthenticatorConfig { ttl: 120 }, Arc::new(provider));

        auth.publish("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["Ttl"], 120);
        assert_eq!(body["Name"], "_acme-challenge");
    }

    #[tokio::test]
    async fn publish_wraps_auth_failure() {
        let (transport, auth) =
            authenticator(MockTransport::new().respond_json(200, &auth_failure()));

        let err = auth
            .publish("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap_err();

        assert_eq!(err.operation, ChallengeOperation::Publish);
        assert_eq!(err.validation_name, "_acme-challenge.example.com");
        assert!(matches!(err.cause(), ProviderError::InvalidCredentials { .. }));
        assert_eq!(transport.mutation_count(), 0);
    }

    #[tokio::test]
    async fn publish_wraps_missing_zone() {
        let (transport, auth) = authenticator(
            MockTransport::new().respond_json(200, &json!([zone(1, "example.org", vec![])])),
        );

        let err = auth
            .publish("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap_err();

        assert!(matches!(err.cause(), ProviderError::DomainNotFound { .. }));
        assert_eq!(transport.mutation_count(), 0);
    }

    #[tokio::test]
    async fn publish_rejects_empty_domain_without_requests() {
        let (transport, auth) = authenticator(MockTransport::new());

        let err = auth.publish("", "_acme-challenge.", "v").await.unwrap_err();

        assert!(matches!(err.cause(), ProviderError::MalformedHostname { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn cleanup_without_zone_succeeds() {
        let (transport, auth) =
            authenticator(MockTransport::new().respond_json(200, &json!([])));

        let outcome = auth
            .cleanup("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap();

        assert_eq!(outcome, CleanupOutcome::ZoneMissing);
        assert_eq!(transport.mutation_count(), 0);
    }

    #[tokio::test]
    async fn cleanup_removes_matching_record() {
        let records = vec![
            txt_record(1, "_acme-challenge.www", "a"),
            txt_record(2, "_acme-challenge.www", "b"),
        ];
        let (transport, auth) = authenticator(
            MockTransport::new()
                .respond_json(200, &json!([zone(4, "example.com", records)]))
                .respond(204, ""),
        );

        let outcome = auth
            .cleanup("www.example.com", "_acme-challenge.www.example.com", "b")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CleanupOutcome::Deleted {
                zone_id: 4,
                record_id: 2
            }
        );
        assert_eq!(transport.requests()[1].path, "/dnszone/4/records/2");
    }

    #[tokio::test]
    async fn cleanup_wraps_auth_failure() {
        let (transport, auth) =
            authenticator(MockTransport::new().respond_json(200, &auth_failure()));

        let err = auth
            .cleanup("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap_err();

        assert_eq!(err.operation, ChallengeOperation::Cleanup);
        assert_eq!(err.validation_name, "_acme-challenge.example.com");
        assert!(matches!(err.cause(), ProviderError::InvalidCredentials { .. }));
        assert_eq!(transport.mutation_count(), 0);
    }

    #[tokio::test]
    async fn cleanup_wraps_transport_failure() {
        let (_, auth) = authenticator(MockTransport::new().fail(ProviderError::NetworkError {
            provider: "bunny".to_string(),
            detail: "dns error".to_string(),
        }));

        let err = auth
            .cleanup("example.com", "_acme-challenge.example.com", "v")
            .await
            .unwrap_err();

        assert_eq!(err.operation, ChallengeOperation::Cleanup);
        assert!(err.cause().is_transport());
    }
}
