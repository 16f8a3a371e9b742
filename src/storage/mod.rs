use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{
    HASH_LENGTH, LINK_TTL_DAYS, Link, LinkState, LinkWithQuestion, NewLink, Question,
    QuestionSeed,
};

pub struct StorageFactory;

impl StorageFactory {
    /// 连接数据库并执行迁移，返回共享的存储句柄
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(config).await?;
        Ok(Arc::new(storage))
    }
}
