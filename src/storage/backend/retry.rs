//! 瞬时数据库错误重试
//!
//! 连接池取连接失败、死锁、SQLite BUSY/LOCKED 之类的错误换个时机通常就能成功；
//! 唯一约束冲突等确定性错误直接返回给调用方。

use std::future::Future;
use std::ops::Deref;
use std::time::Duration;

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 可重试的数据库错误码
///
/// MySQL: 1213 死锁, 1205 锁等待超时
/// PostgreSQL: 40001 序列化失败, 40P01 死锁
/// SQLite: 5 BUSY, 6 LOCKED
const TRANSIENT_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// 拿不到错误码时按消息匹配
const TRANSIENT_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "database table is locked",
    "serialization failure",
];

/// 判断数据库错误是否值得重试
pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime) | DbErr::Query(runtime) => is_transient(runtime),
        _ => false,
    }
}

fn is_transient(err: &RuntimeErr) -> bool {
    let message = match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .deref()
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            if let Some(code) = code {
                return TRANSIENT_CODES.contains(&code.as_str());
            }
            sqlx_err.to_string()
        }
        RuntimeErr::Internal(msg) => msg.clone(),
        #[allow(unreachable_patterns)]
        _ => return false,
    };

    let message = message.to_lowercase();
    TRANSIENT_MESSAGES.iter().any(|m| message.contains(m))
}

/// 重试参数，来自 `[database]` 配置
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// 首次执行之外最多再试几次
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms.max(config.retry_base_delay_ms),
        }
    }
}

impl RetryConfig {
    /// 第 `retry` 次重试前的等待时间（从 1 开始）
    ///
    /// base * 2^(retry-1)，不超过 max，再叠加至多 25% 的随机抖动
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry.saturating_sub(1)).unwrap_or(u64::MAX);
        let capped = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        let jitter = rand::random_range(0..=capped / 4);
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// 执行 `operation`，遇到瞬时错误按指数退避重试
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retry = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if retry > 0 {
                    debug!("{} succeeded after {} retries", operation_name, retry);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !is_retryable_error(&err) {
            return Err(err);
        }
        if retry >= config.max_retries {
            warn!(
                "{} still failing after {} retries: {}",
                operation_name, retry, err
            );
            return Err(err);
        }

        retry += 1;
        let delay = config.delay_for(retry);
        warn!(
            "{} hit a transient error ({}), retry {}/{} in {:?}",
            operation_name, err, retry, config.max_retries, delay
        );
        tokio::time::sleep(delay).await;
    }
}
