//! API 帮助函数

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::MukaError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// Request bodies larger than this are rejected before parsing.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

pub const INVALID_QUESTION_ID_BODY: &str = "questionId is required and must be a number";

/// 构建成功响应
pub fn success_response<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::ok(data))
}

/// 构建错误响应，HTTP 状态码由 ErrorCode 决定
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(code.status()).json(ApiResponse::err(code, message))
}

/// 从 MukaError 构建错误响应
///
/// 客户端错误原样返回 message；基础设施错误只在服务端记录详情，
/// 对外返回 `fallback` + `generic_message`。
pub fn error_from_muka(
    err: &MukaError,
    fallback: ErrorCode,
    generic_message: &str,
) -> HttpResponse {
    let code = ErrorCode::from_error(err, fallback);
    if err.is_client_error() {
        error_response(code, err.message())
    } else {
        error!("{} [{}]: {}", generic_message, err.code(), err);
        error_response(code, generic_message)
    }
}

/// JSON 解析失败统一映射为 400 INVALID_REQUEST
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = error_response(ErrorCode::InvalidRequest, INVALID_QUESTION_ID_BODY);
    InternalError::from_response(err, response).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error_handler)
}
