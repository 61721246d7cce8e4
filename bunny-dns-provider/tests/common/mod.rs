//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use bunny_dns_provider::{
    Authenticator, AuthenticatorConfig, BunnyCredentials, DnsProvider, DnsZone, create_provider,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试记录名前缀（便于手动清理残留）
pub const TEST_RECORD_PREFIX: &str = "_test-";

/// 生成唯一的测试记录名称（相对名）
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("{TEST_RECORD_PREFIX}{}", &uuid.to_string()[..8])
}

/// 生成唯一的挑战值
pub fn generate_challenge_value() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// 测试上下文 - 封装 Provider、Authenticator 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub authenticator: Authenticator,
    pub domain: String,
}

impl TestContext {
    /// 从 `BUNNY_ACCESS_KEY` / `TEST_DOMAIN` 创建测试上下文
    pub fn bunny() -> Option<Self> {
        let access_key = env::var("BUNNY_ACCESS_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let mut credentials = BunnyCredentials::new(access_key);
        if let Ok(api_base) = env::var("BUNNY_API_BASE") {
            credentials = credentials.with_api_base(api_base);
        }

        let provider = create_provider(credentials).ok()?;
        let authenticator =
            Authenticator::new(AuthenticatorConfig::default(), Arc::clone(&provider));

        Some(Self {
            provider,
            authenticator,
            domain,
        })
    }

    /// 测试域名对应的 Zone（重新列出）
    pub async fn find_zone(&self) -> Option<DnsZone> {
        let zones = self.provider.list_zones().await.ok()?;
        zones.into_iter().find(|zone| zone.domain == self.domain)
    }

    /// 完整验证名：`<name>.<domain>`
    pub fn validation_name(&self, record_name: &str) -> String {
        format!("{record_name}.{}", self.domain)
    }

    /// 统计 Zone 中与 (name, value) 匹配的 TXT 记录数
    pub async fn count_txt(&self, record_name: &str, value: &str) -> Option<usize> {
        let zone = self.find_zone().await?;
        Some(
            zone.records
                .iter()
                .filter(|record| record.is_txt(record_name, value))
                .count(),
        )
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        let Some(zone) = self.find_zone().await else {
            return;
        };

        for record in zone.records {
            if record.name.starts_with(TEST_RECORD_PREFIX) {
                let _ = self.provider.delete_record(zone.id, record.id).await;
            }
        }
    }
}
