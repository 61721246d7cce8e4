//! Generic HTTP client tools
//!
//! Request/response values exchanged through [`HttpTransport`], plus the
//! reqwest-backed transport used against the real API.
//!
//! # design principles
//! - **Transport knows nothing about status codes** - it only classifies failures to
//!   reach the server (`NetworkError` / `Timeout`); callers decide what 204 or 400 means
//! - **No retries** - a failed request is reported once; retry policy belongs to the caller
//! - **Logged, never leaked** - bodies go through `truncate_for_log`, the access key is never logged

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::traits::HttpTransport;
use crate::types::BunnyCredentials;
use crate::utils::log_sanitizer::{mask_secret, truncate_for_log};

/// Header carrying the bunny.net API key.
pub(crate) const ACCESS_KEY_HEADER: &str = "AccessKey";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// An API call, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/dnszone/`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn put(path: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// Raw answer from the API: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider_name: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response status and text
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "PUT", used for logs)
    /// * `path` - request path (for logging)
    ///
    /// # Returns
    /// * `Ok(ApiResponse)` - any response that arrived, whatever its status
    /// * `Err(ProviderError::Timeout)` - the request timed out
    /// * `Err(ProviderError::NetworkError)` - any other failure to reach the server
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
    ) -> Result<ApiResponse> {
        log::debug!("[{provider_name}] {method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(ApiResponse { status, body })
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// [`HttpTransport`] over reqwest, authenticated with an `AccessKey` header.
pub struct ReqwestTransport {
    client: Client,
    credentials: BunnyCredentials,
    provider_name: &'static str,
}

impl ReqwestTransport {
    pub fn new(credentials: BunnyCredentials, provider_name: &'static str) -> Result<Self> {
        let client = create_http_client(provider_name)?;
        log::debug!(
            "[{provider_name}] Transport ready for {} (key {})",
            credentials.api_base,
            mask_secret(&credentials.access_key)
        );
        Ok(Self {
            client,
            credentials,
            provider_name,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.credentials.api_base, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCESS_KEY_HEADER, &self.credentials.access_key)
            .header(ACCEPT, "application/json");

        if let Some(body) = request.body {
            log::debug!("[{}] Request Body: {body}", self.provider_name);
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        HttpUtils::execute_request(
            builder,
            self.provider_name,
            request.method.as_str(),
            &request.path,
        )
        .await
    }
}
