mod structs;

pub use structs::*;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 `ET__SERVER__PORT=5001`
pub const ENV_PREFIX: &str = "ET";
