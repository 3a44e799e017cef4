//! Dashboards, reports and timelines

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::errors::Result;
use crate::report::{EmployeeReport, ReportDocument, pdf};
use crate::storage::{ActivityEntry, ActivityWithEmployee, Employee, SeaOrmStorage};
use crate::utils::round1;
use crate::utils::time::{day_bounds, resolve_range, resolve_range_until_today, today};

use super::EmployeeService;

pub const DASHBOARD_RECENT_LIMIT: u64 = 20;

/// 管理员总览
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub active_employees: u64,
    pub total_hours: f64,
    pub total_idle: f64,
    pub avg_productivity: i64,
    pub recent_activities: Vec<ActivityWithEmployee>,
}

/// 生成好的 PDF
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ReportService {
    storage: Arc<SeaOrmStorage>,
    employees: EmployeeService,
}

impl ReportService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            employees: EmployeeService::new(storage.clone()),
            storage,
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let active_employees = self.storage.count_online_employees().await?;
        let sessions = self.storage.sessions_on(today()).await?;

        let total_hours: f64 = sessions.iter().map(|s| s.active_time).sum();
        let total_idle: f64 = sessions.iter().map(|s| s.idle_time).sum();
        let avg_productivity = if sessions.is_empty() {
            0
        } else {
            let sum: i64 = sessions.iter().map(|s| s.productivity_score as i64).sum();
            (sum as f64 / sessions.len() as f64).round_ties_even() as i64
        };

        let recent_activities = self
            .storage
            .recent_activities(None, DASHBOARD_RECENT_LIMIT)
            .await?;

        Ok(DashboardStats {
            active_employees,
            total_hours: round1(total_hours),
            total_idle: round1(total_idle),
            avg_productivity,
            recent_activities,
        })
    }

    /// 起始日默认今天，结束日默认等于起始日，闭区间
    pub async fn employee_report(
        &self,
        employee_id: i32,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<EmployeeReport> {
        let employee = self.employees.get(employee_id).await?;
        let (start, end) = resolve_range(start, end)?;
        self.collect_report(employee, start, end).await
    }

    async fn collect_report(
        &self,
        employee: Employee,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EmployeeReport> {
        let employee_id = employee.id;

        let sessions = self
            .storage
            .sessions_between(employee_id, start, end)
            .await?;
        let app_usage = self
            .storage
            .app_usage_between(employee_id, start, end)
            .await?;
        let websites = self
            .storage
            .website_visits_between(employee_id, start, end)
            .await?;

        Ok(EmployeeReport {
            employee,
            start,
            end,
            sessions,
            app_usage,
            websites,
        })
    }

    pub async fn render_pdf(
        &self,
        employee_id: i32,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<RenderedReport> {
        // 下载的结束日默认今天
        let employee = self.employees.get(employee_id).await?;
        let (start, end) = resolve_range_until_today(start, end)?;
        let report = self.collect_report(employee, start, end).await?;
        let document = ReportDocument::from_report(&report);

        // printpdf 是同步 CPU 计算，放到阻塞线程池
        let bytes = tokio::task::spawn_blocking(move || pdf::render(&document))
            .await
            .map_err(|e| {
                crate::errors::TrackerError::report_render(format!("Render task failed: {}", e))
            })??;

        info!(
            "Rendered report for employee {} ({} bytes)",
            employee_id,
            bytes.len()
        );
        Ok(RenderedReport {
            file_name: report.file_name(),
            bytes,
        })
    }

    /// `[start 00:00, end+1 00:00)` 内的活动，旧的在前；结束日默认今天
    pub async fn timeline(
        &self,
        employee_id: i32,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<ActivityEntry>> {
        self.employees.get(employee_id).await?;
        let (start, end) = resolve_range_until_today(start, end)?;
        let (from, until) = day_bounds(start, end);

        self.storage
            .activities_between(employee_id, from, until)
            .await
    }
}
