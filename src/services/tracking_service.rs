//! Activity, app usage and website visit tracking

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::errors::{Result, TrackerError};
use crate::storage::{
    ActivityEntry, ActivityWithEmployee, AppUsage, EmployeeStatus, Role, SeaOrmStorage,
    WebsiteVisit, WorkSession,
};
use crate::utils::time::today;

pub const DEFAULT_CATEGORY: &str = "neutral";
pub const ACTIVITY_FEED_LIMIT: u64 = 50;

/// Who is asking: admins see everyone, employees only themselves
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub id: i32,
    pub role: Role,
}

impl Viewer {
    fn scope(&self) -> Option<i32> {
        match self.role {
            Role::Admin => None,
            Role::Employee => Some(self.id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityInput {
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct UsageInput {
    /// 应用名或 URL
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub category: Option<String>,
}

/// 员工自己的当天概览
#[derive(Debug, Clone)]
pub struct EmployeeDashboard {
    pub session: Option<WorkSession>,
    pub app_usage: Vec<AppUsage>,
    pub websites: Vec<WebsiteVisit>,
}

pub struct TrackingService {
    storage: Arc<SeaOrmStorage>,
}

fn validate_duration(duration: Option<f64>) -> Result<f64> {
    let duration = duration.unwrap_or(0.0);
    if !duration.is_finite() || duration < 0.0 {
        return Err(TrackerError::validation("duration must be a non-negative number"));
    }
    Ok(duration)
}

fn validate_name(name: Option<String>, field: &str) -> Result<String> {
    match name.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(TrackerError::validation(format!("{} is required", field))),
    }
}

fn category_or_default(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

impl TrackingService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// `idle` 把员工置为 idle，`active` 置回 online，其余类型不改状态
    pub async fn log_activity(&self, employee_id: i32, input: ActivityInput) -> Result<ActivityEntry> {
        let activity_type = validate_name(input.activity_type, "activity_type")?;
        let metadata = input
            .metadata
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        let metadata = serde_json::to_string(&metadata)?;

        let entry = self
            .storage
            .append_activity(
                employee_id,
                &activity_type,
                input.description,
                Some(metadata),
                Utc::now(),
            )
            .await?;

        let status = match activity_type.as_str() {
            "idle" => Some(EmployeeStatus::Idle),
            "active" => Some(EmployeeStatus::Online),
            _ => None,
        };
        if let Some(status) = status {
            self.storage.set_employee_status(employee_id, status).await?;
        }

        debug!("Activity '{}' logged for employee {}", activity_type, employee_id);
        Ok(entry)
    }

    pub async fn log_app_usage(&self, employee_id: i32, input: UsageInput) -> Result<AppUsage> {
        let app_name = validate_name(input.name, "app_name")?;
        let duration = validate_duration(input.duration)?;
        let category = category_or_default(input.category);

        self.storage
            .add_app_usage(
                employee_id,
                &app_name,
                duration,
                &category,
                today(),
                Utc::now(),
            )
            .await
    }

    pub async fn log_website_visit(
        &self,
        employee_id: i32,
        input: UsageInput,
    ) -> Result<WebsiteVisit> {
        let url = validate_name(input.name, "url")?;
        let duration = validate_duration(input.duration)?;
        let category = category_or_default(input.category);

        self.storage
            .add_website_visit(employee_id, &url, duration, &category, today(), Utc::now())
            .await
    }

    /// 最近 50 条活动，新的在前
    pub async fn activity_feed(&self, viewer: Viewer) -> Result<Vec<ActivityWithEmployee>> {
        self.storage
            .recent_activities(viewer.scope(), ACTIVITY_FEED_LIMIT)
            .await
    }

    pub async fn app_usage_today(&self, viewer: Viewer) -> Result<Vec<AppUsage>> {
        self.storage.app_usage_on(today(), viewer.scope()).await
    }

    pub async fn website_visits_today(&self, viewer: Viewer) -> Result<Vec<WebsiteVisit>> {
        self.storage.website_visits_on(today(), viewer.scope()).await
    }

    pub async fn employee_dashboard(&self, employee_id: i32) -> Result<EmployeeDashboard> {
        let day = today();
        let session = self.storage.session_on(employee_id, day).await?;
        let app_usage = self.storage.app_usage_on(day, Some(employee_id)).await?;
        let websites = self
            .storage
            .website_visits_on(day, Some(employee_id))
            .await?;

        Ok(EmployeeDashboard {
            session,
            app_usage,
            websites,
        })
    }
}
