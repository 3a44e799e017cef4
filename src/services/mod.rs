//! Service layer for business logic
//!
//! HTTP handlers and CLI commands share these services. Each one holds
//! an explicitly constructed storage handle.

mod auth_service;
mod employee_service;
mod report_service;
mod settings_service;
mod tracking_service;

pub use auth_service::*;
pub use employee_service::*;
pub use report_service::*;
pub use settings_service::*;
pub use tracking_service::*;
