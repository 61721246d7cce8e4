//! bunny.net HTTP 请求方法

use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http_client::{ApiRequest, ApiResponse, HttpUtils};
use crate::traits::ProviderErrorMapper;
use crate::types::{DnsZone, ZoneListPayload};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{BunnyProvider, ZONES_PATH};

impl BunnyProvider {
    /// 获取并解码 Zone 列表
    ///
    /// 结果按载荷形状区分：Zone 数组、分页信封或错误信封。
    /// 无法解码时，401/403 视为凭证错误，其余为解析错误。
    pub(crate) async fn fetch_zone_payload(&self) -> Result<ZoneListPayload> {
        let response = self.transport.execute(ApiRequest::get(ZONES_PATH)).await?;

        match self.decode_zone_payload(&response.body) {
            Ok(payload) => Ok(payload),
            Err(_) if matches!(response.status, 401 | 403) => {
                Err(ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(format!(
                        "HTTP {}: {}",
                        response.status,
                        truncate_for_log(&response.body)
                    )),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// 数组直接按 `Vec<DnsZone>` 解码，保留具体的 serde 错误（字段、行列）
    fn decode_zone_payload(&self, body: &str) -> Result<ZoneListPayload> {
        if body.trim_start().starts_with('[') {
            HttpUtils::parse_json::<Vec<DnsZone>>(body, self.provider_name())
                .map(ZoneListPayload::Zones)
        } else {
            HttpUtils::parse_json::<ZoneListPayload>(body, self.provider_name())
        }
    }

    /// 执行 PUT 请求（JSON 请求体）
    pub(crate) async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body_json = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        self.transport.execute(ApiRequest::put(path, body_json)).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.transport.execute(ApiRequest::delete(path)).await
    }
}
