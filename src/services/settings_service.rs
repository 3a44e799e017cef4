use std::sync::Arc;

use crate::errors::{Result, TrackerError};
use crate::storage::{SeaOrmStorage, TrackerSettings};
use crate::utils::time::parse_clock;

/// Raw settings payload; fields are optional so missing ones can be reported together
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub work_start: Option<String>,
    pub work_end: Option<String>,
    /// 数字或数字字符串
    pub idle_timeout: Option<serde_json::Value>,
}

pub struct SettingsService {
    storage: Arc<SeaOrmStorage>,
}

/// 解析 idle_timeout：整数、浮点（截断）或数字字符串，必须 >= 1
pub fn parse_idle_timeout(value: &serde_json::Value) -> Result<i32> {
    let invalid = || TrackerError::validation("Invalid time format or idle timeout");

    let minutes: i64 = match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(v) => v,
            None => n.as_f64().filter(|f| f.is_finite()).ok_or_else(invalid)?.trunc() as i64,
        },
        serde_json::Value::String(s) => s.trim().parse().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if minutes < 1 {
        return Err(TrackerError::validation(
            "Idle timeout must be at least 1 minute",
        ));
    }
    i32::try_from(minutes).map_err(|_| invalid())
}

impl SettingsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 未保存过时返回默认值 09:00 / 17:00 / 5
    pub async fn get(&self) -> Result<TrackerSettings> {
        Ok(self.storage.load_settings().await?.unwrap_or_default())
    }

    pub async fn save(&self, input: SettingsInput) -> Result<TrackerSettings> {
        let (Some(work_start), Some(work_end), Some(idle_timeout)) =
            (input.work_start, input.work_end, input.idle_timeout)
        else {
            return Err(TrackerError::validation("Missing required settings"));
        };

        let work_start = parse_clock(&work_start)?;
        let work_end = parse_clock(&work_end)?;
        let idle_timeout = parse_idle_timeout(&idle_timeout)?;

        self.storage
            .save_settings(&TrackerSettings {
                work_start,
                work_end,
                idle_timeout,
                updated_at: None,
            })
            .await
    }
}
