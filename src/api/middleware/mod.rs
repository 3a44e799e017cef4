pub mod auth;
pub mod request_id;
pub mod timing;

pub use auth::{AuthUser, BearerAuth, RequireRole};
pub use request_id::{RequestId, RequestIdMiddleware};
pub use timing::TimingMiddleware;
