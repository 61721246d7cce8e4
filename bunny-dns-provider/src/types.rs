use serde::{Deserialize, Deserializer, Serialize};

// ============ Credentials & Config ============

/// Default bunny.net API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.bunny.net";

/// Default TTL (seconds) for published challenge records.
pub const DEFAULT_CHALLENGE_TTL: u32 = 60;

/// Credentials for the bunny.net API.
///
/// The access key is deliberately left out of the `Debug` representation.
#[derive(Clone, Serialize, Deserialize)]
pub struct BunnyCredentials {
    /// Account API key, sent as the `AccessKey` header.
    #[serde(alias = "AccessKey")]
    pub access_key: String,
    /// API base URL, without trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl BunnyCredentials {
    /// Credentials against the public API endpoint.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            api_base: default_api_base(),
        }
    }

    /// Point the client at a different endpoint (staging, local proxy).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for BunnyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunnyCredentials")
            .field("access_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Settings for the [`Authenticator`](crate::Authenticator) façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatorConfig {
    /// TTL (seconds) of published challenge records.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_ttl() -> u32 {
    DEFAULT_CHALLENGE_TTL
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

// ============ Record Types ============

/// bunny.net numeric record type codes.
///
/// Only [`Txt`](Self::Txt) is ever written; the rest exist so listings with
/// other records decode cleanly and never match a TXT cleanup by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Redirect,
    Flatten,
    PullZone,
    Srv,
    Caa,
    Ptr,
    Script,
    Ns,
    /// A code this crate does not know about.
    Other(u8),
}

impl From<u8> for DnsRecordType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::A,
            1 => Self::Aaaa,
            2 => Self::Cname,
            3 => Self::Txt,
            4 => Self::Mx,
            5 => Self::Redirect,
            6 => Self::Flatten,
            7 => Self::PullZone,
            8 => Self::Srv,
            9 => Self::Caa,
            10 => Self::Ptr,
            11 => Self::Script,
            12 => Self::Ns,
            other => Self::Other(other),
        }
    }
}

impl From<DnsRecordType> for u8 {
    fn from(record_type: DnsRecordType) -> Self {
        match record_type {
            DnsRecordType::A => 0,
            DnsRecordType::Aaaa => 1,
            DnsRecordType::Cname => 2,
            DnsRecordType::Txt => 3,
            DnsRecordType::Mx => 4,
            DnsRecordType::Redirect => 5,
            DnsRecordType::Flatten => 6,
            DnsRecordType::PullZone => 7,
            DnsRecordType::Srv => 8,
            DnsRecordType::Caa => 9,
            DnsRecordType::Ptr => 10,
            DnsRecordType::Script => 11,
            DnsRecordType::Ns => 12,
            DnsRecordType::Other(code) => code,
        }
    }
}

// ============ Zones & Records ============

/// The listing carries `null` for fields a record type does not use
/// (e.g. `Value` on pull-zone records); treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A DNS record as listed inside a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsRecord {
    /// Provider record id.
    pub id: i64,
    /// Name relative to the zone; empty for the apex.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: DnsRecordType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ttl: u32,
}

impl DnsRecord {
    /// Whether this is the TXT record `name = value`.
    pub fn is_txt(&self, name: &str, value: &str) -> bool {
        self.record_type == DnsRecordType::Txt && self.name == name && self.value == value
    }
}

/// A provider-managed zone and its current record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsZone {
    /// Provider zone id.
    pub id: i64,
    /// Registrable domain the zone serves.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<DnsRecord>,
}

/// Error envelope returned by the API instead of data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorEnvelope {
    pub message: String,
    #[serde(default)]
    pub error_key: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

/// Decoded body of `GET /dnszone/`.
///
/// The listing endpoint signals a rejected key with an error envelope rather
/// than a distinct status, so the shape of the payload decides the outcome.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ZoneListPayload {
    /// Plain JSON array of zones.
    Zones(Vec<DnsZone>),
    /// Paged envelope used by newer API revisions.
    Page {
        #[serde(rename = "Items")]
        items: Vec<DnsZone>,
        #[serde(rename = "HasMoreItems", default)]
        has_more_items: bool,
    },
    /// `{"Message": ...}` error envelope.
    Error(ApiErrorEnvelope),
}

/// Body of `PUT /dnszone/{zoneId}/records`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTxtRecordRequest {
    pub name: String,
    pub value: String,
    pub ttl: u32,
    #[serde(rename = "Type")]
    pub record_type: DnsRecordType,
    pub pull_zone_id: i64,
}

impl CreateTxtRecordRequest {
    pub fn new(name: impl Into<String>, value: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ttl,
            record_type: DnsRecordType::Txt,
            pull_zone_id: 0,
        }
    }
}
