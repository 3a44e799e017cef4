//! 员工报表
//!
//! [`EmployeeReport`] 是按日期区间筛选后的原始数据，[`ReportDocument`] 是
//! 与渲染无关的版面模型（标题、信息块、三张表），[`pdf`] 负责把它画成 PDF。

pub mod pdf;

use chrono::NaiveDate;

use crate::storage::{AppUsage, Employee, WebsiteVisit, WorkSession};
use crate::utils::time::format_date;

pub const REPORT_TITLE: &str = "Employee Activity Report";
const NOT_AVAILABLE: &str = "N/A";

/// 区间 `[start, end]` 内的员工数据
#[derive(Debug, Clone)]
pub struct EmployeeReport {
    pub employee: Employee,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sessions: Vec<WorkSession>,
    pub app_usage: Vec<AppUsage>,
    pub websites: Vec<WebsiteVisit>,
}

impl EmployeeReport {
    /// 下载文件名 `report_<username>_<start_date>.pdf`
    pub fn file_name(&self) -> String {
        format!(
            "report_{}_{}.pdf",
            self.employee.username,
            format_date(self.start)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    /// 列宽比例，长度与 headers 相同
    pub weights: Vec<f32>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub info: Vec<(String, String)>,
    pub tables: Vec<ReportTable>,
}

fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ReportDocument {
    pub fn from_report(report: &EmployeeReport) -> Self {
        let employee = &report.employee;

        let info = vec![
            ("Email".to_string(), employee.email.clone()),
            ("Department".to_string(), or_na(employee.department.as_deref())),
            ("Position".to_string(), or_na(employee.position.as_deref())),
            (
                "Report Period".to_string(),
                format!("{} to {}", format_date(report.start), format_date(report.end)),
            ),
        ];

        let sessions = ReportTable {
            title: "Work Sessions".to_string(),
            headers: strings(&["Date", "Active Time (h)", "Idle Time (h)", "Productivity (%)"]),
            weights: vec![1.0, 1.0, 1.0, 1.0],
            rows: report
                .sessions
                .iter()
                .map(|s| {
                    vec![
                        format_date(s.date),
                        one_decimal(s.active_time),
                        one_decimal(s.idle_time),
                        s.productivity_score.to_string(),
                    ]
                })
                .collect(),
        };

        let apps = ReportTable {
            title: "Application Usage".to_string(),
            headers: strings(&["Application", "Duration (h)", "Category"]),
            weights: vec![2.0, 1.0, 1.0],
            rows: report
                .app_usage
                .iter()
                .map(|a| {
                    vec![
                        a.app_name.clone(),
                        one_decimal(a.duration),
                        or_na(a.category.as_deref()),
                    ]
                })
                .collect(),
        };

        let websites = ReportTable {
            title: "Website Visits".to_string(),
            headers: strings(&["URL", "Duration (h)", "Visits", "Category"]),
            weights: vec![3.0, 1.0, 0.8, 1.0],
            rows: report
                .websites
                .iter()
                .map(|w| {
                    vec![
                        w.url.clone(),
                        one_decimal(w.duration),
                        w.visits.to_string(),
                        or_na(w.category.as_deref()),
                    ]
                })
                .collect(),
        };

        Self {
            title: REPORT_TITLE.to_string(),
            subtitle: employee.name.clone(),
            info,
            tables: vec![sessions, apps, websites],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::EmployeeStatus;
    use chrono::Utc;

    pub(crate) fn sample_report() -> EmployeeReport {
        let now = Utc::now();
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        EmployeeReport {
            employee: Employee {
                id: 1,
                username: "employee1".to_string(),
                password_hash: String::new(),
                name: "John Doe".to_string(),
                email: "john@company.com".to_string(),
                department: Some("Engineering".to_string()),
                position: None,
                status: EmployeeStatus::Offline,
                is_active: true,
                created_at: now,
                last_login: None,
            },
            start: day,
            end: day,
            sessions: vec![WorkSession {
                id: 1,
                employee_id: 1,
                clock_in: now,
                clock_out: None,
                active_time: 7.24,
                idle_time: 0.8,
                productivity_score: 85,
                date: day,
            }],
            app_usage: vec![AppUsage {
                id: 1,
                employee_id: 1,
                app_name: "VS Code".to_string(),
                duration: 4.0,
                category: Some("productive".to_string()),
                date: day,
                last_used: now,
            }],
            websites: vec![WebsiteVisit {
                id: 1,
                employee_id: 1,
                url: "https://docs.example.com".to_string(),
                duration: 1.55,
                visits: 3,
                category: None,
                date: day,
                last_visited: now,
            }],
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(sample_report().file_name(), "report_employee1_2024-05-06.pdf");
    }

    #[test]
    fn test_document_layout() {
        let doc = ReportDocument::from_report(&sample_report());
        assert_eq!(doc.title, "Employee Activity Report");
        assert_eq!(doc.subtitle, "John Doe");
        assert_eq!(doc.info[1], ("Department".to_string(), "Engineering".to_string()));
        assert_eq!(doc.info[2], ("Position".to_string(), "N/A".to_string()));
        assert_eq!(doc.info[3].1, "2024-05-06 to 2024-05-06");

        let titles: Vec<&str> = doc.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Work Sessions", "Application Usage", "Website Visits"]);

        assert_eq!(doc.tables[0].rows[0], ["2024-05-06", "7.2", "0.8", "85"]);
        assert_eq!(doc.tables[1].rows[0], ["VS Code", "4.0", "productive"]);
        assert_eq!(doc.tables[2].rows[0][3], "N/A");
        assert_eq!(doc.tables[2].rows[0][2], "3");
    }

    #[test]
    fn test_weights_match_headers() {
        let doc = ReportDocument::from_report(&sample_report());
        for table in &doc.tables {
            assert_eq!(table.headers.len(), table.weights.len());
            for row in &table.rows {
                assert_eq!(row.len(), table.headers.len());
            }
        }
    }
}
