use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{MukaError, Result};
use migration::{Migrator, MigratorTrait};

/// 连接 SQLite 数据库（自动创建 + WAL）
pub async fn connect_sqlite(database_url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
    };
    use std::str::FromStr;

    // 外键默认开启，links.question_id 由数据库兜底校验
    let opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| MukaError::database_config(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .pragma("temp_store", "memory");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.pool_size.max(1))
        .acquire_timeout(Duration::from_secs(config.timeout))
        .connect_with(opt)
        .await
        .map_err(|e| {
            MukaError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
        })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接通用数据库（MySQL/PostgreSQL）
pub async fn connect_generic(
    database_url: &str,
    backend_name: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection> {
    let pool_size = config.pool_size.max(1);

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(pool_size)
        .min_connections(pool_size.min(2))
        .connect_timeout(Duration::from_secs(config.timeout))
        .acquire_timeout(Duration::from_secs(config.timeout))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(|e| {
        MukaError::database_connection(format!(
            "无法连接到 {} 数据库: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| MukaError::database_operation(format!("迁移失败: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
