//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::error;

use super::converters::{link_model_to_link, question_model_to_question};
use super::{SeaOrmStorage, retry};
use crate::errors::{MukaError, Result};
use crate::storage::{LinkWithQuestion, Question};

use migration::entities::{link, question};

impl SeaOrmStorage {
    /// 按 display_order 升序返回全部问题（相同 order 时按 id）
    pub async fn list_questions(&self) -> Result<Vec<Question>> {
        let db = &self.db;

        let models = retry::with_retry("list_questions", self.retry_config, || async {
            question::Entity::find()
                .order_by_asc(question::Column::DisplayOrder)
                .order_by_asc(question::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| MukaError::database_operation(format!("查询问题列表失败: {}", e)))?;

        Ok(models.into_iter().map(question_model_to_question).collect())
    }

    pub async fn get_question(&self, id: i32) -> Result<Option<Question>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_question({})", id), self.retry_config, || async {
            question::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| MukaError::database_operation(format!("查询问题 {} 失败: {}", id, e)))?;

        Ok(model.map(question_model_to_question))
    }

    /// 按 hash 查找链接，并带出关联的问题
    pub async fn find_link_by_hash(&self, hash: &str) -> Result<Option<LinkWithQuestion>> {
        let db = &self.db;

        let row = retry::with_retry(&format!("find_link({})", hash), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Hash.eq(hash))
                .find_also_related(question::Entity)
                .one(db)
                .await
        })
        .await
        .map_err(|e| MukaError::database_operation(format!("查询链接失败: {}", e)))?;

        match row {
            None => Ok(None),
            Some((link_model, Some(question_model))) => Ok(Some(LinkWithQuestion {
                link: link_model_to_link(link_model),
                question: question_model_to_question(question_model),
            })),
            Some((link_model, None)) => {
                // 外键约束下不应出现
                error!(
                    "Link {} references missing question {}",
                    link_model.hash, link_model.question_id
                );
                Err(MukaError::database_operation(format!(
                    "链接 {} 关联的问题 {} 不存在",
                    link_model.hash, link_model.question_id
                )))
            }
        }
    }

    pub async fn count_questions(&self) -> Result<u64> {
        question::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| MukaError::database_operation(format!("统计问题数量失败: {}", e)))
    }

    pub async fn count_links(&self) -> Result<u64> {
        link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| MukaError::database_operation(format!("统计链接数量失败: {}", e)))
    }
}
