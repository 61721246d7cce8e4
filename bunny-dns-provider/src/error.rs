use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for zone lookup and record reconciliation.
///
/// Provider-backed variants carry a `provider` field identifying which API
/// produced the error, plus variant-specific context. All variants are
/// serializable for structured error reporting.
///
/// # Transport Errors
///
/// [`NetworkError`](Self::NetworkError) and [`Timeout`](Self::Timeout) both
/// mean the provider could not be reached. Neither is retried here; retry
/// policy belongs to the calling orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provider rejected the access key.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The hostname could not be split into labels.
    MalformedHostname {
        /// The offending input.
        hostname: String,
    },

    /// No zone in the account matches the registrable domain.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Registrable domain that was searched for.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The create-record call did not answer with the success status.
    RecordWriteFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the record was written to.
        zone_id: i64,
        /// HTTP status returned by the provider.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The delete-record call did not answer with the success status.
    RecordDeleteFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the record belongs to.
        zone_id: i64,
        /// Record that could not be deleted.
        record_id: i64,
        /// HTTP status returned by the provider.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::MalformedHostname { .. }
                | Self::DomainNotFound { .. }
        )
    }

    /// Whether the provider could not be reached at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::MalformedHostname { hostname } => {
                write!(f, "Malformed hostname: '{hostname}'")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::RecordWriteFailed {
                provider,
                zone_id,
                status,
                body,
            } => {
                write!(
                    f,
                    "[{provider}] Failed to create record in zone {zone_id} (HTTP {status}): {body}"
                )
            }
            Self::RecordDeleteFailed {
                provider,
                zone_id,
                record_id,
                status,
                body,
            } => {
                write!(
                    f,
                    "[{provider}] Failed to delete record {record_id} in zone {zone_id} (HTTP {status}): {body}"
                )
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// The orchestrator-facing operation a [`ChallengeError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeOperation {
    Publish,
    Cleanup,
}

impl std::fmt::Display for ChallengeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Publish => f.write_str("publish"),
            Self::Cleanup => f.write_str("cleanup"),
        }
    }
}

/// Uniform error surfaced to the ACME orchestrator.
///
/// Wraps whatever went wrong below the [`Authenticator`](crate::Authenticator)
/// so callers see one error shape; the original [`ProviderError`] stays
/// reachable through [`cause`](Self::cause) and [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("challenge {operation} failed for '{validation_name}'")]
pub struct ChallengeError {
    /// Which façade operation failed.
    pub operation: ChallengeOperation,
    /// The validation name the orchestrator asked for.
    pub validation_name: String,
    #[source]
    source: ProviderError,
}

impl ChallengeError {
    pub(crate) fn new(
        operation: ChallengeOperation,
        validation_name: impl Into<String>,
        source: ProviderError,
    ) -> Self {
        Self {
            operation,
            validation_name: validation_name.into(),
            source,
        }
    }

    /// The lower-layer error that caused this failure.
    #[must_use]
    pub fn cause(&self) -> &ProviderError {
        &self.source
    }

    /// Consume the wrapper and return the lower-layer error.
    #[must_use]
    pub fn into_cause(self) -> ProviderError {
        self.source
    }
}
