use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{LinkService, QuestionCatalog};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub question_catalog: Arc<QuestionCatalog>,
    pub link_service: Arc<LinkService>,
}

/// 准备服务器启动的上下文：连接存储、迁移、种子数据、构建 service
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let base_url = config.app.base_url();
    url::Url::parse(&base_url)
        .with_context(|| format!("Invalid public base URL: {}", base_url))?;

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let question_catalog = Arc::new(QuestionCatalog::new(storage.clone()));
    if config.database.seed_on_startup {
        question_catalog
            .seed_defaults()
            .await
            .context("Failed to seed question catalog")?;
    } else {
        match storage.count_questions().await {
            Ok(0) => warn!("Question catalog is empty and seeding is disabled; run `muka seed`"),
            Ok(count) => debug!("Question catalog has {} questions", count),
            Err(e) => warn!("Failed to count questions: {}", e),
        }
    }

    let link_service = Arc::new(LinkService::new(
        storage.clone(),
        base_url.clone(),
        config.links.max_hash_attempts,
    ));
    info!("Share links will use base URL {}", base_url);

    debug!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        question_catalog,
        link_service,
    })
}
