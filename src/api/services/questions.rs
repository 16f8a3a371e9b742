//! GET /api/questions

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::QuestionCatalog;

use super::error_code::ErrorCode;
use super::helpers::{error_from_muka, success_response};

pub async fn list_questions(catalog: web::Data<Arc<QuestionCatalog>>) -> impl Responder {
    match catalog.list_questions().await {
        Ok(questions) => {
            trace!("Listing {} questions", questions.len());
            success_response(StatusCode::OK, questions)
        }
        Err(e) => error_from_muka(&e, ErrorCode::DatabaseError, "Failed to fetch questions"),
    }
}

pub fn questions_routes() -> actix_web::Scope {
    web::scope("/questions")
        .route("", web::get().to(list_questions))
        .route("", web::head().to(list_questions))
}
