//! bunny.net error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{BunnyProvider, PROVIDER_NAME};

/// The zone listing answers a rejected key with `{"Message": ...}` instead of
/// data; that envelope is the only API error this provider has to interpret.
/// Mutation failures are reported by status code and carry the raw body.
impl ProviderErrorMapper for BunnyProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        let raw_message = match raw.code {
            Some(code) if !code.is_empty() => format!("{} ({code})", raw.message),
            _ => raw.message,
        };
        ProviderError::InvalidCredentials {
            provider: self.provider_name().to_string(),
            raw_message: Some(raw_message),
        }
    }
}
