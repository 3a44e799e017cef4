//! Mode routing
//!
//! 无子命令或 `serve` 时运行 HTTP 服务，其余子命令走 CLI。

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
