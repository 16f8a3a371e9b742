use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

use super::types::{ApiResponse, HealthChecks, HealthResponse, HealthStorageCheck};

/// Storage probe budget.
const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Health Service
///
/// 直接访问 storage，不经过业务 service。
pub struct HealthService;

impl HealthService {
    async fn check_storage(storage: &SeaOrmStorage) -> HealthStorageCheck {
        let backend = storage.backend_name().to_string();

        let probe = async {
            storage.ping().await?;
            storage.count_questions().await
        };

        match tokio::time::timeout(STORAGE_CHECK_TIMEOUT, probe).await {
            Ok(Ok(count)) => HealthStorageCheck {
                status: "healthy".to_string(),
                backend,
                questions_count: Some(count),
                error: None,
            },
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    questions_count: None,
                    error: Some(e.error_type().to_string()),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    questions_count: None,
                    error: Some("timeout".to_string()),
                }
            }
        }
    }

    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let storage_status = Self::check_storage(&storage).await;
        let is_healthy = storage_status.status == "healthy";

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        let health_data = HealthResponse {
            status: storage_status.status.clone(),
            timestamp: now.to_rfc3339(),
            uptime,
            checks: HealthChecks {
                storage: storage_status,
            },
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        trace!(
            "Health check completed in {:?}, healthy: {}",
            start_time.elapsed(),
            is_healthy
        );

        HttpResponse::build(status).json(ApiResponse {
            success: is_healthy,
            data: Some(health_data),
            error: None,
        })
    }

    // 存活检查，不访问数据库
    pub async fn liveness_check() -> impl Responder {
        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
