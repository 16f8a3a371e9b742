//! Service layer for business logic
//!
//! Shared by the HTTP API and the CLI.

mod link_service;
mod question_catalog;

pub use link_service::*;
pub use question_catalog::*;
