//! Link issuance and resolution
//!
//! The only component that reads or writes link rows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::errors::MukaError;
use crate::storage::{HASH_LENGTH, Link, LinkState, NewLink, Question, SeaOrmStorage};
use crate::utils::generate_random_code;

/// Result of issuing a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedLink {
    pub hash: String,
    pub share_url: String,
    pub question_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Public view of an active link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub id: i32,
    pub hash: String,
    pub used: bool,
    pub expired: bool,
    pub question: Question,
}

/// Link plus its current state, whatever it is (CLI inspection)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInspection {
    pub link: Link,
    pub question: Question,
    pub state: LinkState,
}

/// Produces candidate hashes for new links.
pub type HashGenerator = fn() -> String;

fn random_hash() -> String {
    generate_random_code(HASH_LENGTH)
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    base_url: String,
    max_hash_attempts: u32,
    generate_hash: HashGenerator,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>, base_url: impl Into<String>, max_hash_attempts: u32) -> Self {
        Self {
            storage,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_hash_attempts: max_hash_attempts.max(1),
            generate_hash: random_hash,
        }
    }

    /// 替换哈希生成器（测试中用于构造碰撞）
    pub fn with_hash_generator(mut self, generate_hash: HashGenerator) -> Self {
        self.generate_hash = generate_hash;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/r/{hash}`
    pub fn share_url(&self, hash: &str) -> String {
        format!("{}/r/{}", self.base_url, hash)
    }

    /// Range check on a parsed `questionId`.
    ///
    /// Non-positive ids are malformed input; ids beyond the column range
    /// cannot exist and are reported as unknown questions.
    pub fn validate_question_id(raw: i64) -> Result<i32, MukaError> {
        if raw <= 0 {
            return Err(MukaError::validation("questionId must be a positive number"));
        }
        i32::try_from(raw).map_err(|_| {
            MukaError::invalid_question_id(format!("Question with ID {} not found", raw))
        })
    }

    /// 签发新链接
    pub async fn issue_link(&self, question_id: i64) -> Result<IssuedLink, MukaError> {
        let question_id = Self::validate_question_id(question_id)?;

        if self.storage.get_question(question_id).await?.is_none() {
            return Err(MukaError::invalid_question_id(format!(
                "Question with ID {} not found",
                question_id
            )));
        }

        let mut attempt = 0;
        let link = loop {
            attempt += 1;
            let new_link = NewLink::new((self.generate_hash)(), question_id, Utc::now());

            match self.storage.insert_link(&new_link).await {
                Ok(link) => break link,
                Err(MukaError::HashCollision(detail)) if attempt < self.max_hash_attempts => {
                    warn!(
                        "LinkService: hash collision (attempt {}/{}): {}",
                        attempt, self.max_hash_attempts, detail
                    );
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            "LinkService: issued link '{}' for question {} (expires {})",
            link.hash, link.question_id, link.expires_at
        );

        Ok(IssuedLink {
            share_url: self.share_url(&link.hash),
            hash: link.hash,
            question_id: link.question_id,
            created_at: link.created_at,
            expires_at: link.expires_at,
        })
    }

    pub async fn resolve_link(&self, hash: &str) -> Result<LinkView, MukaError> {
        self.resolve_link_at(hash, Utc::now()).await
    }

    /// Read-only resolution against a fixed clock.
    ///
    /// Checks run in order: not found, expired, used.
    pub async fn resolve_link_at(&self, hash: &str, now: DateTime<Utc>) -> Result<LinkView, MukaError> {
        if hash.is_empty() {
            return Err(MukaError::validation("Invalid link hash"));
        }

        let found = self
            .storage
            .find_link_by_hash(hash)
            .await?
            .ok_or_else(|| MukaError::link_not_found("Link not found"))?;

        match found.link.state_at(now) {
            LinkState::Expired => Err(MukaError::link_expired("Link has expired")),
            LinkState::Used => Err(MukaError::link_already_used("Link has already been used")),
            LinkState::Active => Ok(LinkView {
                id: found.link.id,
                hash: found.link.hash,
                used: false,
                expired: false,
                question: found.question,
            }),
        }
    }

    /// 消费链接：used 只会从 false 变为 true
    ///
    /// Intended to be called by the answer-submission flow. The write is
    /// conditional on `used = false`, so of two concurrent callers exactly
    /// one succeeds and the other gets `LinkAlreadyUsed`.
    pub async fn mark_used(&self, hash: &str) -> Result<(), MukaError> {
        self.resolve_link(hash).await?;

        if self.storage.mark_link_used(hash).await? == 0 {
            return Err(MukaError::link_already_used("Link has already been used"));
        }

        info!("LinkService: link '{}' consumed", hash);
        Ok(())
    }

    /// Fetch a link in any state without failing on expired/used.
    pub async fn inspect_link(&self, hash: &str) -> Result<LinkInspection, MukaError> {
        if hash.is_empty() {
            return Err(MukaError::validation("Invalid link hash"));
        }

        let found = self
            .storage
            .find_link_by_hash(hash)
            .await?
            .ok_or_else(|| MukaError::link_not_found("Link not found"))?;

        let state = found.link.state_at(Utc::now());
        Ok(LinkInspection {
            link: found.link,
            question: found.question,
            state,
        })
    }
}
