pub mod auth;
pub mod employees;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod reports;
pub mod routes;
pub mod settings;
pub mod tracking;
pub mod types;

pub use error_code::ErrorCode;
pub use health::{AppStartTime, HealthService};
pub use helpers::{
    error_response, json_error_handler, json_response, path_error_handler, query_error_handler,
    success_response, success_with_message,
};
pub use routes::api_routes;
pub use types::ApiResponse;
