//! Logging system initialization
//!
//! 根据 `[logging]` 配置初始化 tracing。只能在启动时调用一次。

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

const DEFAULT_LOG_NAME: &str = "employee-tracker.log";

type BoxedWriter = Box<dyn Write + Send + Sync>;

/// 按配置创建输出目标，文件打不开时退回 stdout
fn build_writer(config: &LoggingConfig) -> BoxedWriter {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Box::new(std::io::stdout());
    };

    let path = Path::new(log_file);
    if config.enable_rotation {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_NAME);

        match rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
        {
            Ok(appender) => Box::new(appender),
            Err(e) => {
                eprintln!("Failed to create rolling log appender: {}, using stdout", e);
                Box::new(std::io::stdout())
            }
        }
    } else {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}, using stdout", log_file, e);
                Box::new(std::io::stdout())
            }
        }
    }
}

/// 初始化日志
///
/// 返回的 `WorkerGuard` 必须存活到进程退出，否则缓冲的日志会丢失。
/// `RUST_LOG` 存在时优先于配置中的 level。
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let writer = build_writer(config);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let to_console = config.file.as_ref().is_none_or(|f| f.is_empty());
    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    // 测试中可能重复初始化，失败时保留已有 subscriber
    let result = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_falls_back_to_stdout_without_file() {
        let config = LoggingConfig {
            file: Some(String::new()),
            ..Default::default()
        };
        // 不 panic 即可
        let _writer = build_writer(&config);
    }

    #[test]
    fn test_writer_appends_to_plain_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tracker.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().to_string()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = build_writer(&config);
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
