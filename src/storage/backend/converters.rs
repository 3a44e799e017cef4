use std::str::FromStr;

use tracing::warn;

use crate::storage::models::{
    ActivityEntry, Admin, AppUsage, Employee, EmployeeStatus, TrackerSettings, WebsiteVisit,
    WorkSession,
};
use migration::entities::{
    activity_log, admin, app_usage, employee, settings, website_visit, work_session,
};

pub fn model_to_admin(model: admin::Model) -> Admin {
    Admin {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        email: model.email,
        created_at: model.created_at,
    }
}

/// 将 Sea-ORM Model 转换为 Employee
///
/// 未知的 status 字符串按 offline 处理。
pub fn model_to_employee(model: employee::Model) -> Employee {
    let status = EmployeeStatus::from_str(&model.status).unwrap_or_else(|_| {
        warn!(
            "Unknown employee status '{}' for id {}, treating as offline",
            model.status, model.id
        );
        EmployeeStatus::Offline
    });

    Employee {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        name: model.name,
        email: model.email,
        department: model.department,
        position: model.position,
        status,
        is_active: model.is_active,
        created_at: model.created_at,
        last_login: model.last_login,
    }
}

pub fn model_to_activity(model: activity_log::Model) -> ActivityEntry {
    ActivityEntry {
        id: model.id,
        employee_id: model.employee_id,
        activity_type: model.activity_type,
        description: model.description,
        timestamp: model.timestamp,
        metadata: model.metadata,
    }
}

pub fn model_to_session(model: work_session::Model) -> WorkSession {
    WorkSession {
        id: model.id,
        employee_id: model.employee_id,
        clock_in: model.clock_in,
        clock_out: model.clock_out,
        active_time: model.active_time,
        idle_time: model.idle_time,
        productivity_score: model.productivity_score,
        date: model.date,
    }
}

pub fn model_to_app_usage(model: app_usage::Model) -> AppUsage {
    AppUsage {
        id: model.id,
        employee_id: model.employee_id,
        app_name: model.app_name,
        duration: model.duration,
        category: model.category,
        date: model.date,
        last_used: model.last_used,
    }
}

pub fn model_to_website_visit(model: website_visit::Model) -> WebsiteVisit {
    WebsiteVisit {
        id: model.id,
        employee_id: model.employee_id,
        url: model.url,
        duration: model.duration,
        visits: model.visits,
        category: model.category,
        date: model.date,
        last_visited: model.last_visited,
    }
}

pub fn model_to_settings(model: settings::Model) -> TrackerSettings {
    TrackerSettings {
        work_start: model.work_start,
        work_end: model.work_end,
        idle_timeout: model.idle_timeout,
        updated_at: Some(model.updated_at),
    }
}
