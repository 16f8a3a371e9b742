use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;

/// Share hash length.
pub const HASH_LENGTH: usize = 10;

/// 链接有效期（天），签发时固定
pub const LINK_TTL_DAYS: i64 = 7;

/// 问题模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub template: String,
    pub description: Option<String>,
    pub category: String,
    pub order: i32,
    #[serde(serialize_with = "crate::utils::iso8601_millis::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Seed row for the question catalog, keyed on `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSeed {
    pub id: i32,
    pub template: String,
    pub description: Option<String>,
    pub category: String,
    pub order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LinkState {
    Active,
    Expired,
    Used,
}

/// 持久化的分享链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i32,
    pub hash: String,
    pub question_id: i32,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Link {
    /// Expired strictly after `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// 过期判断优先于已使用
    pub fn state_at(&self, now: DateTime<Utc>) -> LinkState {
        if self.is_expired_at(now) {
            LinkState::Expired
        } else if self.used {
            LinkState::Used
        } else {
            LinkState::Active
        }
    }
}

/// A link about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub hash: String,
    pub question_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewLink {
    /// `expires_at` is derived from `issued_at` once and never recomputed.
    pub fn new(hash: impl Into<String>, question_id: i32, issued_at: DateTime<Utc>) -> Self {
        // 截断到毫秒，和 API 输出精度一致
        let created_at = issued_at.trunc_subsecs(3);
        Self {
            hash: hash.into(),
            question_id,
            created_at,
            expires_at: created_at + Duration::days(LINK_TTL_DAYS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkWithQuestion {
    pub link: Link,
    pub question: Question,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn link(used: bool, expires_at: DateTime<Utc>) -> Link {
        Link {
            id: 1,
            hash: "abcdefghij".to_string(),
            question_id: 1,
            used,
            created_at: expires_at - Duration::days(LINK_TTL_DAYS),
            expires_at,
        }
    }

    #[test]
    fn test_new_link_expiry_is_seven_days() {
        let issued = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let new_link = NewLink::new("abcdefghij", 3, issued);
        assert_eq!(new_link.created_at, issued);
        assert_eq!(new_link.expires_at - new_link.created_at, Duration::days(7));
    }

    #[test]
    fn test_new_link_truncates_to_millis() {
        let issued = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let new_link = NewLink::new("abcdefghij", 1, issued);
        assert_eq!(new_link.created_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_state_active() {
        let now = Utc::now();
        assert_eq!(link(false, now + Duration::days(1)).state_at(now), LinkState::Active);
    }

    #[test]
    fn test_state_used() {
        let now = Utc::now();
        assert_eq!(link(true, now + Duration::days(1)).state_at(now), LinkState::Used);
    }

    #[test]
    fn test_expired_takes_precedence_over_used() {
        let now = Utc::now();
        assert_eq!(link(true, now - Duration::seconds(1)).state_at(now), LinkState::Expired);
        assert_eq!(link(false, now - Duration::seconds(1)).state_at(now), LinkState::Expired);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        assert!(!link(false, now).is_expired_at(now));
    }

    #[test]
    fn test_state_as_ref() {
        assert_eq!(LinkState::Expired.as_ref(), "expired");
    }
}
