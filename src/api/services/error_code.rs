//! 统一 API 错误码定义
//!
//! 序列化为 SCREAMING_SNAKE_CASE 字符串，客户端按 code 分支，不解析 message。

use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::MukaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::AsRefStr, strum::EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 输入错误
    InvalidRequest,
    InvalidQuestionId,

    // 链接状态
    LinkNotFound,
    LinkExpired,
    LinkAlreadyUsed,

    // 基础设施
    InternalError,
    DatabaseError,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest | ErrorCode::InvalidQuestionId => StatusCode::BAD_REQUEST,
            ErrorCode::LinkNotFound => StatusCode::NOT_FOUND,
            ErrorCode::LinkExpired => StatusCode::GONE,
            ErrorCode::LinkAlreadyUsed => StatusCode::CONFLICT,
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-fault errors map to their own code; anything else becomes
    /// `fallback` so the endpoint decides what an opaque failure looks like.
    pub fn from_error(err: &MukaError, fallback: ErrorCode) -> ErrorCode {
        match err {
            MukaError::Validation(_) => ErrorCode::InvalidRequest,
            MukaError::InvalidQuestionId(_) => ErrorCode::InvalidQuestionId,
            MukaError::LinkNotFound(_) => ErrorCode::LinkNotFound,
            MukaError::LinkExpired(_) => ErrorCode::LinkExpired,
            MukaError::LinkAlreadyUsed(_) => ErrorCode::LinkAlreadyUsed,
            MukaError::HashCollision(_)
            | MukaError::DatabaseConfig(_)
            | MukaError::DatabaseConnection(_)
            | MukaError::DatabaseOperation(_)
            | MukaError::FileOperation(_)
            | MukaError::Serialization(_) => fallback,
        }
    }
}
