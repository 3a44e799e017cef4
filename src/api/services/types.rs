//! API 类型定义
//!
//! 请求体字段全部可选，缺失字段由 service 层校验并给出明确的 400 信息。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::services::{
    ActivityInput, CreateEmployeeInput, DashboardStats, EmployeeDashboard, EmployeeOverview,
    SettingsInput, UpdateEmployeeInput, UsageInput,
};
use crate::storage::{
    ActivityEntry, ActivityWithEmployee, Admin, AppUsage, Employee, EmployeeStatus, Role,
    TrackerSettings, WebsiteVisit, WorkSession,
};
use crate::report::EmployeeReport;
use crate::utils::time::{format_clock, format_date, format_time_of_day};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

// ============ 认证 ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct LoginUser {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: Role,
}

#[derive(Serialize, Clone, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

impl LoginResponse {
    pub fn admin(token: String, admin: &Admin) -> Self {
        Self {
            token,
            user: LoginUser {
                id: admin.id,
                username: admin.username.clone(),
                name: None,
                email: admin.email.clone(),
                kind: Role::Admin,
            },
        }
    }

    pub fn employee(token: String, employee: &Employee) -> Self {
        Self {
            token,
            user: LoginUser {
                id: employee.id,
                username: employee.username.clone(),
                name: Some(employee.name.clone()),
                email: employee.email.clone(),
                kind: Role::Employee,
            },
        }
    }
}

// ============ 员工管理 ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CreateEmployeeRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

impl From<CreateEmployeeRequest> for CreateEmployeeInput {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            name: req.name,
            email: req.email,
            department: req.department,
            position: req.position,
        }
    }
}

/// 出现即为 `Some`，其中 `null` 为 `Some(None)`
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// department / position 传 `null` 即清空
#[derive(Deserialize, Clone, Debug, Default)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub position: Option<Option<String>>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateEmployeeRequest> for UpdateEmployeeInput {
    fn from(req: UpdateEmployeeRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            department: req.department,
            position: req.position,
            password: req.password,
            is_active: req.is_active,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct CreatedEmployee {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
}

impl From<&Employee> for CreatedEmployee {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            username: e.username.clone(),
            name: e.name.clone(),
            email: e.email.clone(),
        }
    }
}

/// 员工列表项，附带当天工时
#[derive(Serialize, Clone, Debug)]
pub struct EmployeeListItem {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: EmployeeStatus,
    pub is_active: bool,
    pub last_login: Option<String>,
    #[serde(rename = "activeTime")]
    pub active_time: f64,
    #[serde(rename = "idleTime")]
    pub idle_time: f64,
    pub productivity: i32,
}

impl From<&EmployeeOverview> for EmployeeListItem {
    fn from(o: &EmployeeOverview) -> Self {
        let e = &o.employee;
        Self {
            id: e.id,
            username: e.username.clone(),
            name: e.name.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
            position: e.position.clone(),
            status: e.status,
            is_active: e.is_active,
            last_login: e.last_login.map(iso),
            active_time: o.today.as_ref().map_or(0.0, |s| s.active_time),
            idle_time: o.today.as_ref().map_or(0.0, |s| s.idle_time),
            productivity: o.today.as_ref().map_or(0, |s| s.productivity_score),
        }
    }
}

// ============ 跟踪 ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ActivityRequest {
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl From<ActivityRequest> for ActivityInput {
    fn from(req: ActivityRequest) -> Self {
        Self {
            activity_type: req.activity_type,
            description: req.description,
            metadata: req.metadata,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AppUsageRequest {
    pub app_name: Option<String>,
    pub duration: Option<f64>,
    pub category: Option<String>,
}

impl From<AppUsageRequest> for UsageInput {
    fn from(req: AppUsageRequest) -> Self {
        Self {
            name: req.app_name,
            duration: req.duration,
            category: req.category,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct WebsiteVisitRequest {
    pub url: Option<String>,
    pub duration: Option<f64>,
    pub category: Option<String>,
}

impl From<WebsiteVisitRequest> for UsageInput {
    fn from(req: WebsiteVisitRequest) -> Self {
        Self {
            name: req.url,
            duration: req.duration,
            category: req.category,
        }
    }
}

fn activity_icon(activity_type: &str) -> &'static str {
    match activity_type {
        "active" => "💻",
        "idle" => "💤",
        _ => "🕒",
    }
}

/// 活动流条目
#[derive(Serialize, Clone, Debug)]
pub struct ActivityFeedItem {
    pub employee: String,
    pub icon: &'static str,
    pub text: Option<String>,
    pub time: String,
    #[serde(rename = "timeStr")]
    pub time_str: String,
}

impl From<&ActivityWithEmployee> for ActivityFeedItem {
    fn from(a: &ActivityWithEmployee) -> Self {
        Self {
            employee: a.employee_name.clone(),
            icon: activity_icon(&a.entry.activity_type),
            text: a.entry.description.clone(),
            time: iso(a.entry.timestamp),
            time_str: format_time_of_day(a.entry.timestamp),
        }
    }
}

/// `GET /employee/app-usage` 的条目，沿用 `time` 字段名
#[derive(Serialize, Clone, Debug)]
pub struct AppUsageToday {
    pub app: String,
    pub time: f64,
    pub category: Option<String>,
}

impl From<&AppUsage> for AppUsageToday {
    fn from(a: &AppUsage) -> Self {
        Self {
            app: a.app_name.clone(),
            time: a.duration,
            category: a.category.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AppUsageItem {
    pub app: String,
    pub duration: f64,
    pub category: Option<String>,
}

impl From<&AppUsage> for AppUsageItem {
    fn from(a: &AppUsage) -> Self {
        Self {
            app: a.app_name.clone(),
            duration: a.duration,
            category: a.category.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct WebsiteItem {
    pub url: String,
    pub duration: f64,
    pub visits: i32,
    pub category: Option<String>,
}

impl From<&WebsiteVisit> for WebsiteItem {
    fn from(w: &WebsiteVisit) -> Self {
        Self {
            url: w.url.clone(),
            duration: w.duration,
            visits: w.visits,
            category: w.category.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct DashboardSession {
    pub clock_in: String,
    pub active_time: f64,
    pub idle_time: f64,
    pub productivity: i32,
}

#[derive(Serialize, Clone, Debug)]
pub struct EmployeeDashboardResponse {
    pub session: Option<DashboardSession>,
    pub app_usage: Vec<AppUsageItem>,
    pub websites: Vec<WebsiteItem>,
}

impl From<&EmployeeDashboard> for EmployeeDashboardResponse {
    fn from(d: &EmployeeDashboard) -> Self {
        Self {
            session: d.session.as_ref().map(|s| DashboardSession {
                clock_in: iso(s.clock_in),
                active_time: s.active_time,
                idle_time: s.idle_time,
                productivity: s.productivity_score,
            }),
            app_usage: d.app_usage.iter().map(AppUsageItem::from).collect(),
            websites: d.websites.iter().map(WebsiteItem::from).collect(),
        }
    }
}

// ============ 报表 ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct RecentActivity {
    pub employee: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: Option<String>,
    pub timestamp: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct DashboardResponse {
    pub active_employees: u64,
    pub total_hours: f64,
    pub total_idle: f64,
    pub avg_productivity: i64,
    pub recent_activities: Vec<RecentActivity>,
}

impl From<&DashboardStats> for DashboardResponse {
    fn from(s: &DashboardStats) -> Self {
        Self {
            active_employees: s.active_employees,
            total_hours: s.total_hours,
            total_idle: s.total_idle,
            avg_productivity: s.avg_productivity,
            recent_activities: s
                .recent_activities
                .iter()
                .map(|a| RecentActivity {
                    employee: a.employee_name.clone(),
                    activity_type: a.entry.activity_type.clone(),
                    description: a.entry.description.clone(),
                    timestamp: iso(a.entry.timestamp),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ReportEmployee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct SessionItem {
    pub date: String,
    pub clock_in: String,
    pub clock_out: Option<String>,
    pub active_time: f64,
    pub idle_time: f64,
    pub productivity: i32,
}

impl From<&WorkSession> for SessionItem {
    fn from(s: &WorkSession) -> Self {
        Self {
            date: format_date(s.date),
            clock_in: iso(s.clock_in),
            clock_out: s.clock_out.map(iso),
            active_time: s.active_time,
            idle_time: s.idle_time,
            productivity: s.productivity_score,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ReportResponse {
    pub employee: ReportEmployee,
    pub sessions: Vec<SessionItem>,
    pub app_usage: Vec<AppUsageItem>,
    pub websites: Vec<WebsiteItem>,
}

impl From<&EmployeeReport> for ReportResponse {
    fn from(r: &EmployeeReport) -> Self {
        Self {
            employee: ReportEmployee {
                id: r.employee.id,
                name: r.employee.name.clone(),
                email: r.employee.email.clone(),
                department: r.employee.department.clone(),
                position: r.employee.position.clone(),
            },
            sessions: r.sessions.iter().map(SessionItem::from).collect(),
            app_usage: r.app_usage.iter().map(AppUsageItem::from).collect(),
            websites: r.websites.iter().map(WebsiteItem::from).collect(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TimelineItem {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: Option<String>,
    pub timestamp: String,
    #[serde(rename = "timeStr")]
    pub time_str: String,
    pub metadata: serde_json::Value,
}

impl From<&ActivityEntry> for TimelineItem {
    fn from(a: &ActivityEntry) -> Self {
        Self {
            activity_type: a.activity_type.clone(),
            description: a.description.clone(),
            timestamp: iso(a.timestamp),
            time_str: format_time_of_day(a.timestamp),
            metadata: a.metadata_json(),
        }
    }
}

// ============ 设置 ============

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SettingsRequest {
    pub work_start: Option<String>,
    pub work_end: Option<String>,
    pub idle_timeout: Option<serde_json::Value>,
}

impl From<SettingsRequest> for SettingsInput {
    fn from(req: SettingsRequest) -> Self {
        Self {
            work_start: req.work_start,
            work_end: req.work_end,
            idle_timeout: req.idle_timeout,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct SettingsResponse {
    pub work_start: String,
    pub work_end: String,
    pub idle_timeout: i32,
    pub updated_at: Option<String>,
}

impl From<&TrackerSettings> for SettingsResponse {
    fn from(s: &TrackerSettings) -> Self {
        Self {
            work_start: format_clock(s.work_start),
            work_end: format_clock(s.work_end),
            idle_timeout: s.idle_timeout,
            updated_at: s.updated_at.map(iso),
        }
    }
}

// ============ 健康检查 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: String,
    pub database: String,
    pub uptime: u64,
    pub response_time_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_update_request_null_differs_from_missing() {
        let req: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"department": null, "position": "Lead"}"#).unwrap();
        assert_eq!(req.department, Some(None));
        assert_eq!(req.position, Some(Some("Lead".to_string())));

        let req: UpdateEmployeeRequest = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(req.department, None);
        assert_eq!(req.position, None);
    }

    fn employee() -> Employee {
        Employee {
            id: 3,
            username: "jdoe".to_string(),
            password_hash: "x".to_string(),
            name: "John Doe".to_string(),
            email: "john@company.com".to_string(),
            department: Some("Engineering".to_string()),
            position: None,
            status: EmployeeStatus::Online,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_login_user_type_field() {
        let json = serde_json::to_value(LoginResponse::employee("t".into(), &employee())).unwrap();
        assert_eq!(json["user"]["type"], "employee");
        assert_eq!(json["user"]["name"], "John Doe");

        let admin = Admin {
            id: 1,
            username: "admin".into(),
            password_hash: "x".into(),
            email: "admin@company.com".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(LoginResponse::admin("t".into(), &admin)).unwrap();
        assert_eq!(json["user"]["type"], "admin");
        assert!(json["user"].get("name").is_none());
    }

    #[test]
    fn test_list_item_without_session_is_zero() {
        let item = EmployeeListItem::from(&EmployeeOverview {
            employee: employee(),
            today: None,
        });
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["activeTime"], 0.0);
        assert_eq!(json["idleTime"], 0.0);
        assert_eq!(json["productivity"], 0);
        assert_eq!(json["status"], "online");
        assert!(json["last_login"].is_null());
    }

    #[test]
    fn test_session_item_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let session = WorkSession {
            id: 1,
            employee_id: 3,
            clock_in: date.and_hms_opt(9, 0, 0).unwrap().and_utc(),
            clock_out: None,
            active_time: 6.5,
            idle_time: 0.5,
            productivity_score: 88,
            date,
        };
        let json = serde_json::to_value(SessionItem::from(&session)).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert!(json["clock_out"].is_null());
        assert_eq!(json["productivity"], 88);
    }

    #[test]
    fn test_activity_icons() {
        assert_eq!(activity_icon("active"), "💻");
        assert_eq!(activity_icon("idle"), "💤");
        assert_eq!(activity_icon("clockin"), "🕒");
    }
}
