//! SeaORM storage backend
//!
//! Questions and links live in SQLite, MySQL/MariaDB or PostgreSQL,
//! picked from the scheme of `database_url`.

mod connection;
mod converters;
mod mutations;
mod operations;
mod query;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{MukaError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{link_model_to_link, new_link_to_active_model, question_model_to_question};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(MukaError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
///
/// The only owner of the connection pool. Services hold it behind an `Arc`.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(MukaError::database_config("database_url 未设置"));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Single round-trip liveness probe.
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| MukaError::database_connection(format!("数据库不可用: {}", e)))
    }

    /// 关闭连接池（进程退出时调用）
    pub async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| MukaError::database_connection(format!("关闭数据库连接失败: {}", e)))
    }
}
