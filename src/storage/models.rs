use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 认证主体的角色
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// 员工在线状态
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmployeeStatus {
    Online,
    Idle,
    #[default]
    Offline,
}

#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: EmployeeStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// 新建员工所需字段，密码已哈希
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// 部分更新，None 表示不修改，`Some(None)` 清空可空列
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<Option<String>>,
    pub position: Option<Option<String>>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.password_hash.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub id: i64,
    pub employee_id: i32,
    pub activity_type: String,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// 原样保存的 JSON 文本
    pub metadata: Option<String>,
}

impl ActivityEntry {
    /// 解析 metadata，缺失或非法时返回空对象
    pub fn metadata_json(&self) -> serde_json::Value {
        self.metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
            .filter(|v| v.is_object())
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
    }
}

/// 带员工姓名的活动记录
#[derive(Debug, Clone)]
pub struct ActivityWithEmployee {
    pub entry: ActivityEntry,
    pub employee_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkSession {
    pub id: i64,
    pub employee_id: i32,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub active_time: f64,
    pub idle_time: f64,
    pub productivity_score: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppUsage {
    pub id: i64,
    pub employee_id: i32,
    pub app_name: String,
    pub duration: f64,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub last_used: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebsiteVisit {
    pub id: i64,
    pub employee_id: i32,
    pub url: String,
    pub duration: f64,
    pub visits: i32,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub last_visited: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    /// 分钟
    pub idle_timeout: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            idle_timeout: 5,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::from_str("employee").unwrap(), Role::Employee);
        assert!(Role::from_str("root").is_err());
        assert_eq!(
            serde_json::to_string(&Role::Employee).unwrap(),
            "\"employee\""
        );
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Offline);
        assert_eq!(EmployeeStatus::Idle.as_ref(), "idle");
        assert_eq!(
            EmployeeStatus::from_str("online").unwrap(),
            EmployeeStatus::Online
        );
    }

    #[test]
    fn test_metadata_json_fallback() {
        let mut entry = ActivityEntry {
            id: 1,
            employee_id: 1,
            activity_type: "active".to_string(),
            description: None,
            timestamp: Utc::now(),
            metadata: Some(r#"{"window":"editor"}"#.to_string()),
        };
        assert_eq!(entry.metadata_json()["window"], "editor");

        entry.metadata = Some("not json".to_string());
        assert_eq!(entry.metadata_json(), serde_json::json!({}));

        entry.metadata = None;
        assert_eq!(entry.metadata_json(), serde_json::json!({}));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = TrackerSettings::default();
        assert_eq!(settings.work_start.format("%H:%M").to_string(), "09:00");
        assert_eq!(settings.work_end.format("%H:%M").to_string(), "17:00");
        assert_eq!(settings.idle_timeout, 5);
    }
}
