//! 测试辅助模块
//!
//! 提供脚本化的 `HttpTransport` mock 和 Zone 列表构造工具。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use crate::error::{ProviderError, Result};
use crate::http_client::{ApiRequest, ApiResponse};
use crate::providers::BunnyProvider;
use crate::traits::HttpTransport;

// ===== MockTransport =====

/// 按顺序返回预设响应，并记录收到的每个请求
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 追加一个响应
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// 追加一个 JSON 响应
    #[must_use]
    pub fn respond_json(self, status: u16, body: &Value) -> Self {
        self.respond(status, body.to_string())
    }

    /// 追加一个传输层错误
    #[must_use]
    pub fn fail(self, error: ProviderError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// 已收到的全部请求
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 非 GET 请求数量
    pub fn mutation_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method != Method::GET)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::NetworkError {
                    provider: "mock".to_string(),
                    detail: format!("no scripted response for {} {}", request.method, request.path),
                })
            })
    }
}

/// 用 mock 构造 Provider，同时返回 mock 以便断言请求
pub fn mock_provider(transport: MockTransport) -> (Arc<MockTransport>, BunnyProvider) {
    let transport = Arc::new(transport);
    let provider = BunnyProvider::with_transport(transport.clone());
    (transport, provider)
}

// ===== JSON 构造 =====

pub fn txt_record(id: i64, name: &str, value: &str) -> Value {
    json!({ "Id": id, "Type": 3, "Name": name, "Value": value, "Ttl": 60 })
}

pub fn zone(id: i64, domain: &str, records: Vec<Value>) -> Value {
    json!({ "Id": id, "Domain": domain, "Records": records })
}

pub fn auth_failure() -> Value {
    json!({ "Message": "Authorization has been denied for this request." })
}
