pub mod shutdown;
pub mod startup;

pub use startup::{AppState, ensure_bootstrap_admin, prepare_server_startup};
