//! API 路由配置
//!
//! 认证由 scope 上的中间件组合完成：`BearerAuth` 在外层校验 token，
//! `RequireRole` 在内层检查角色。

use actix_web::{dev::HttpServiceFactory, web};

use crate::api::middleware::{BearerAuth, RequireRole};

use super::auth::{admin_login, employee_login, logout};
use super::employees::{create_employee, deactivate_employee, list_employees, update_employee};
use super::health::HealthService;
use super::reports::{dashboard, download_report, employee_report, timeline};
use super::settings::{get_settings, save_settings};
use super::tracking::{
    activity_feed, app_usage_today, employee_dashboard, log_activity, log_app_usage,
    log_website_visit, website_visits_today,
};

/// 认证路由 `/auth`
///
/// - POST /auth/admin/login
/// - POST /auth/employee/login - 同时打卡上班
/// - POST /auth/logout - 需要 token
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/admin/login", web::post().to(admin_login))
        .route("/employee/login", web::post().to(employee_login))
        .service(
            web::resource("/logout")
                .wrap(BearerAuth)
                .route(web::post().to(logout)),
        )
}

/// 管理员路由 `/admin`，全部要求 admin 角色
pub fn admin_routes() -> impl HttpServiceFactory {
    web::scope("/admin")
        .wrap(RequireRole::admin())
        .wrap(BearerAuth)
        .route("/employees", web::get().to(list_employees))
        .route("/employees", web::post().to(create_employee))
        .route("/employees/{id}", web::put().to(update_employee))
        .route("/employees/{id}", web::delete().to(deactivate_employee))
        .route("/dashboard", web::get().to(dashboard))
        .route("/employee/{id}/report", web::get().to(employee_report))
        .route(
            "/employee/{id}/report/download",
            web::get().to(download_report),
        )
        .route("/employee/{id}/timeline", web::get().to(timeline))
        .route("/settings", web::get().to(get_settings))
        .route("/settings", web::post().to(save_settings))
}

/// 员工路由 `/employee`
///
/// 上报接口和个人面板只允许员工；查询接口任何已登录主体可用，
/// 管理员看到全部员工的数据。
pub fn employee_routes() -> impl HttpServiceFactory {
    web::scope("/employee")
        .wrap(BearerAuth)
        .service(
            web::resource("/activity")
                .route(web::get().to(activity_feed))
                .route(
                    web::post()
                        .to(log_activity)
                        .wrap(RequireRole::employee()),
                ),
        )
        .service(
            web::resource("/app-usage")
                .route(web::get().to(app_usage_today))
                .route(
                    web::post()
                        .to(log_app_usage)
                        .wrap(RequireRole::employee()),
                ),
        )
        .service(
            web::resource("/website-visit")
                .route(web::get().to(website_visits_today))
                .route(
                    web::post()
                        .to(log_website_visit)
                        .wrap(RequireRole::employee()),
                ),
        )
        .service(
            web::resource("/dashboard")
                .wrap(RequireRole::employee())
                .route(web::get().to(employee_dashboard)),
        )
}

/// 全部 `/api` 路由
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
        .service(auth_routes())
        .service(admin_routes())
        .service(employee_routes())
}
