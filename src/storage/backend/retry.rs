//! 数据库操作重试
//!
//! 只重试连接类和锁冲突类错误；约束冲突等业务错误直接返回。

use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 判断数据库错误是否可重试
pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => {
            is_retryable_runtime_error(runtime_err)
        }
        _ => false,
    }
}

fn is_retryable_runtime_error(err: &sea_orm::error::RuntimeErr) -> bool {
    use sea_orm::error::RuntimeErr;

    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            use std::ops::Deref;
            if let Some(code) = sqlx_err
                .deref()
                .as_database_error()
                .and_then(|db_err| db_err.code())
            {
                // MySQL 死锁/锁超时，PostgreSQL 序列化失败/死锁，SQLite BUSY/LOCKED
                return matches!(
                    code.as_ref(),
                    "1213" | "1205" | "40001" | "40P01" | "5" | "6"
                );
            }
            is_retryable_message(&sqlx_err.to_string())
        }
        RuntimeErr::Internal(msg) => is_retryable_message(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn is_retryable_message(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    ["deadlock", "lock wait timeout", "database is locked", "serialization failure"]
        .iter()
        .any(|needle| msg.contains(needle))
}

/// 重试配置，`max_retries = 0` 表示只执行一次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
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
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

/// 指数退避重试执行器（带随机抖动）
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if !is_retryable_error(&err) || attempt >= config.max_retries {
            return Err(err);
        }

        attempt += 1;
        let delay = calculate_backoff(attempt, config.base_delay_ms, config.max_delay_ms);
        warn!(
            "'{}' failed (attempt {}/{}): {}; retrying in {} ms",
            operation_name,
            attempt,
            config.max_retries + 1,
            err,
            delay
        );
        sleep(Duration::from_millis(delay)).await;
    }
}

/// base * 2^(attempt-1)，上限 max，再加 0-25% 抖动
fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> u64 {
    let exp_delay = base_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
    let capped = exp_delay.min(max_ms);
    capped.saturating_add(rand::random_range(0..=capped / 4))
}
