//! HTTP API layer
//!
//! Thin translation between the services and JSON over HTTP.

pub mod middleware;
pub mod services;
