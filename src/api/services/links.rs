//! /api/links 路由
//!
//! - POST /links        签发链接
//! - GET  /links/{hash} 解析链接

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::debug;

use crate::services::LinkService;

use super::error_code::ErrorCode;
use super::helpers::{INVALID_QUESTION_ID_BODY, error_from_muka, success_response};
use super::types::{CreateLinkRequest, CreateLinkResponse, LinkResponse};

pub async fn create_link(
    service: web::Data<Arc<LinkService>>,
    body: web::Json<CreateLinkRequest>,
) -> impl Responder {
    let question_id = match body.parse_question_id() {
        Ok(id) => id,
        Err(e) => return error_from_muka(&e, ErrorCode::InvalidRequest, INVALID_QUESTION_ID_BODY),
    };
    debug!("Create link request for question {}", question_id);

    match service.issue_link(question_id).await {
        Ok(issued) => success_response(StatusCode::CREATED, CreateLinkResponse::from(issued)),
        Err(e) => error_from_muka(&e, ErrorCode::InternalError, "Failed to create link"),
    }
}

pub async fn get_link(
    service: web::Data<Arc<LinkService>>,
    path: web::Path<String>,
) -> impl Responder {
    let hash = path.into_inner();

    match service.resolve_link(&hash).await {
        Ok(view) => success_response(StatusCode::OK, LinkResponse::from(view)),
        Err(e) => error_from_muka(&e, ErrorCode::InternalError, "Failed to fetch link"),
    }
}

/// `{hash:.*}` 允许空段，`/api/links/` 会以空 hash 进入 handler 返回 400
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::post().to(create_link))
        .route("/{hash:.*}", web::get().to(get_link))
}
