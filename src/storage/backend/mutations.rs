//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr, sea_query::Expr};
use tracing::{debug, info};

use super::converters::{link_model_to_link, new_link_to_active_model};
use super::operations::upsert_questions;
use super::{SeaOrmStorage, retry};
use crate::errors::{MukaError, Result};
use crate::storage::{Link, NewLink, QuestionSeed};

use migration::entities::link;

impl SeaOrmStorage {
    /// 插入新链接
    ///
    /// hash 唯一索引冲突返回 `HashCollision`（调用方换一个 hash 重试），
    /// 外键冲突返回 `InvalidQuestionId`。
    pub async fn insert_link(&self, new_link: &NewLink) -> Result<Link> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("insert_link({})", new_link.hash),
            self.retry_config,
            || async { new_link_to_active_model(new_link).insert(db).await },
        )
        .await;

        match result {
            Ok(model) => {
                debug!("Link inserted: {} -> question {}", model.hash, model.question_id);
                Ok(link_model_to_link(model))
            }
            Err(e) => Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => MukaError::hash_collision(
                    format!("hash '{}' 已存在: {}", new_link.hash, detail),
                ),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => MukaError::invalid_question_id(
                    format!("Question with ID {} not found", new_link.question_id),
                ),
                _ => MukaError::database_operation(format!(
                    "插入链接 '{}' 失败: {}",
                    new_link.hash, e
                )),
            }),
        }
    }

    /// 条件更新 `used = false -> true`
    ///
    /// 返回受影响行数；0 表示链接不存在或已被使用。
    pub async fn mark_link_used(&self, hash: &str) -> Result<u64> {
        let db = &self.db;

        let result = retry::with_retry(&format!("mark_used({})", hash), self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(link::Column::Used, Expr::value(true))
                .filter(link::Column::Hash.eq(hash))
                .filter(link::Column::Used.eq(false))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| MukaError::database_operation(format!("标记链接已使用失败: {}", e)))?;

        if result.rows_affected > 0 {
            info!("Link marked as used: {}", hash);
        }
        Ok(result.rows_affected)
    }

    /// 按 id upsert 问题目录，返回写入的行数
    pub async fn seed_questions(&self, seeds: &[QuestionSeed], now: DateTime<Utc>) -> Result<usize> {
        let db = &self.db;

        retry::with_retry("seed_questions", self.retry_config, || async {
            upsert_questions(db, seeds, now).await
        })
        .await
        .map_err(|e| MukaError::database_operation(format!("写入问题目录失败: {}", e)))?;

        info!("Question catalog seeded: {} rows", seeds.len());
        Ok(seeds.len())
    }
}
