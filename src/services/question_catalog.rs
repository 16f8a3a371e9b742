//! Question catalog
//!
//! Read-only at runtime. Rows are written only by the idempotent seed.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::MukaError;
use crate::storage::{Question, QuestionSeed, SeaOrmStorage};

/// 内置问题模板（按 id upsert）
pub fn default_questions() -> Vec<QuestionSeed> {
    let rows: [(i32, &str, &str, &str); 7] = [
        (
            1,
            "나한테 어울리는 음악은?",
            "나에게 어울리는 노래를 추천받고 싶을 때",
            "relationship",
        ),
        (
            2,
            "내가 힘들 때 들으면 좋을 음악은?",
            "위로가 필요할 때 들을 노래를 추천받고 싶을 때",
            "relationship",
        ),
        (
            3,
            "나를 생각하면 떠오르는 음악은?",
            "친구가 나를 떠올릴 때 생각나는 노래가 궁금할 때",
            "relationship",
        ),
        (
            4,
            "요즘 네가 꽂힌 음악은?",
            "친구가 요즘 빠진 노래가 궁금할 때",
            "situation",
        ),
        (
            5,
            "아무 생각 없이 들을 수 있는 음악 추천해줘",
            "편하게 들을 수 있는 노래를 추천받고 싶을 때",
            "situation",
        ),
        (6, "인생 노래 하나만 추천해줘", "친구의 인생 노래가 궁금할 때", "situation"),
        (
            7,
            "비 오는 날 듣기 좋은 음악은?",
            "비 오는 날 분위기에 맞는 노래를 추천받고 싶을 때",
            "situation",
        ),
    ];

    rows.into_iter()
        .map(|(id, template, description, category)| QuestionSeed {
            id,
            template: template.to_string(),
            description: Some(description.to_string()),
            category: category.to_string(),
            order: id,
        })
        .collect()
}

pub struct QuestionCatalog {
    storage: Arc<SeaOrmStorage>,
}

impl QuestionCatalog {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// All questions, ascending by `order`.
    pub async fn list_questions(&self) -> Result<Vec<Question>, MukaError> {
        self.storage.list_questions().await
    }

    pub async fn get_question(&self, id: i32) -> Result<Option<Question>, MukaError> {
        self.storage.get_question(id).await
    }

    /// Upsert the given rows keyed on id. Re-running with the same set
    /// updates rows in place.
    pub async fn seed(&self, seeds: &[QuestionSeed]) -> Result<usize, MukaError> {
        for seed in seeds {
            if seed.id <= 0 {
                return Err(MukaError::validation(format!(
                    "question id must be positive, got {}",
                    seed.id
                )));
            }
            if seed.template.trim().is_empty() {
                return Err(MukaError::validation(format!(
                    "question {} has an empty template",
                    seed.id
                )));
            }
        }

        let count = self.storage.seed_questions(seeds, Utc::now()).await?;
        info!("QuestionCatalog: seeded {} questions", count);
        Ok(count)
    }

    pub async fn seed_defaults(&self) -> Result<usize, MukaError> {
        self.seed(&default_questions()).await
    }
}
