mod config_gen;
mod reset_password;
mod seed;

pub use config_gen::config_generate;
pub use reset_password::run_reset_password;
pub use seed::run_seed;
