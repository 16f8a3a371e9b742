pub mod error_code;
pub mod health;
pub mod helpers;
pub mod links;
pub mod questions;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::{error_from_muka, error_response, json_config, success_response};
pub use routes::api_routes;
pub use types::*;
