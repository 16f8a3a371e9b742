//! API 请求/响应类型

use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;
use super::helpers::INVALID_QUESTION_ID_BODY;
use crate::errors::MukaError;
use crate::services::{IssuedLink, LinkView};
use crate::storage::Question;
use crate::utils::format_iso8601;

/// 统一响应信封
///
/// 成功：`{ "success": true, "data": ... }`
/// 失败：`{ "success": false, "error": { "code", "message" } }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// POST /api/links 请求体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub question_id: serde_json::Number,
}

impl CreateLinkRequest {
    /// Whole-valued JSON numbers (`1`, `1.0`, `1e0`) are accepted; fractions are not.
    ///
    /// Range checks happen later in `LinkService::validate_question_id`.
    pub fn parse_question_id(&self) -> Result<i64, MukaError> {
        if let Some(id) = self.question_id.as_i64() {
            return Ok(id);
        }
        match self.question_id.as_f64() {
            // 超出 i64 的整数值饱和转换，由后续范围检查拒绝
            Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            _ => Err(MukaError::validation(INVALID_QUESTION_ID_BODY)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub hash: String,
    pub share_url: String,
    pub expires_at: String,
}

impl From<IssuedLink> for CreateLinkResponse {
    fn from(issued: IssuedLink) -> Self {
        Self {
            expires_at: format_iso8601(&issued.expires_at),
            hash: issued.hash,
            share_url: issued.share_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i32,
    pub hash: String,
    pub used: bool,
    pub expired: bool,
    pub question: Question,
}

impl From<LinkView> for LinkResponse {
    fn from(view: LinkView) -> Self {
        Self {
            id: view.id,
            hash: view.hash,
            used: view.used,
            expired: view.expired,
            question: view.question,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
    pub response_time_ms: u64,
}
