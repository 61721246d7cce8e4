use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::http_client::{ApiRequest, ApiResponse};
use crate::types::{CreateTxtRecordRequest, DnsZone};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（bunny.net 的 `ErrorKey`）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：序列化错误
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// HTTP 传输层 Trait
///
/// 负责认证头、超时与网络错误分类；业务语义（状态码含义、载荷解析）
/// 由调用方处理。测试中以脚本化实现替换。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送请求并返回状态码与响应文本
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// DNS 提供商 Trait
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取账户下全部 Zone（含记录），单次请求
    async fn list_zones(&self) -> Result<Vec<DnsZone>>;

    /// 在 Zone 下追加一条 TXT 记录（不做重复检查）
    async fn create_txt_record(&self, zone_id: i64, req: &CreateTxtRecordRequest) -> Result<()>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()>;

    /// 验证凭证是否有效
    ///
    /// 默认实现列出一次 Zone：凭证被拒绝返回 `Ok(false)`，
    /// 其他错误（网络、解析）原样返回。
    async fn validate_credentials(&self) -> Result<bool> {
        match self.list_zones().await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
