//! Server mode
//!
//! Builds the actix-web app and runs it until Ctrl+C.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{AppStartTime, api_routes, health_routes, json_config};
use crate::config::CorsConfig;
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Use [\"*\"] to allow any origin."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 未启用时使用浏览器默认同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(["GET", "POST", "HEAD", "OPTIONS"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .allowed_header(actix_web::http::header::ACCEPT)
        .expose_headers(["x-request-id"])
        .max_age(cors_config.max_age);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let storage = startup.storage.clone();
    let question_catalog = startup.question_catalog.clone();
    let link_service = startup.link_service.clone();

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.workers.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let storage_for_shutdown = storage.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware) // 包在 Timing 外层，timing 日志带 request_id
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(json_config())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(question_catalog.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(api_routes())
            .service(health_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .disable_signals()
    .run();

    warn!(
        "Starting server at http://{} with {} workers",
        bind_address, workers
    );

    let handle = server.handle();

    let served = tokio::select! {
        res = server => res.context("HTTP server exited with error"),
        _ = lifetime::shutdown::wait_for_shutdown_signal() => {
            handle.stop(true).await;
            warn!("HTTP server stopped");
            Ok(())
        }
    };

    lifetime::shutdown::close_storage(&storage_for_shutdown).await;
    served
}
