//! 路由汇总
//!
//! - `/api/questions`
//! - `/api/links`, `/api/links/{hash}`
//! - `/health`, `/health/live`

use actix_web::web;

use super::links::links_routes;
use super::questions::questions_routes;

pub use super::health::health_routes;

/// JSON API 路由 `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(questions_routes())
        .service(links_routes())
}
