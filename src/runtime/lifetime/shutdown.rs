use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::SeaOrmStorage;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C
pub async fn wait_for_shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}

/// 在超时内关闭连接池（HTTP server 停止之后调用）
pub async fn close_storage(storage: &SeaOrmStorage) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), storage.close()).await {
        Ok(Ok(())) => info!("Database connections closed"),
        Ok(Err(e)) => error!("Failed to close database connections: {}", e),
        Err(_) => error!(
            "Closing database connections timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}
