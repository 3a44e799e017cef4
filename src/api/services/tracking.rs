//! 员工端上报与查询

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::api::middleware::AuthUser;
use crate::errors::TrackerError;
use crate::services::{TrackingService, Viewer};

use super::helpers::{success_response, success_with_message};
use super::types::{
    ActivityFeedItem, ActivityRequest, AppUsageRequest, AppUsageToday, EmployeeDashboardResponse,
    WebsiteItem, WebsiteVisitRequest,
};

fn viewer(user: AuthUser) -> Viewer {
    Viewer {
        id: user.id,
        role: user.role,
    }
}

pub async fn log_activity(
    user: AuthUser,
    body: web::Json<ActivityRequest>,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let entry = tracking.log_activity(user.id, body.into_inner().into()).await?;
    Ok(success_with_message(
        StatusCode::OK,
        "Activity logged successfully",
        json!({ "id": entry.id }),
    ))
}

pub async fn activity_feed(
    user: AuthUser,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let feed = tracking.activity_feed(viewer(user)).await?;
    let items: Vec<ActivityFeedItem> = feed.iter().map(ActivityFeedItem::from).collect();
    Ok(success_response(items))
}

pub async fn log_app_usage(
    user: AuthUser,
    body: web::Json<AppUsageRequest>,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let usage = tracking.log_app_usage(user.id, body.into_inner().into()).await?;
    Ok(success_with_message(
        StatusCode::OK,
        "App usage logged successfully",
        AppUsageToday::from(&usage),
    ))
}

pub async fn app_usage_today(
    user: AuthUser,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let usage = tracking.app_usage_today(viewer(user)).await?;
    let items: Vec<AppUsageToday> = usage.iter().map(AppUsageToday::from).collect();
    Ok(success_response(items))
}

pub async fn log_website_visit(
    user: AuthUser,
    body: web::Json<WebsiteVisitRequest>,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let visit = tracking
        .log_website_visit(user.id, body.into_inner().into())
        .await?;
    Ok(success_with_message(
        StatusCode::OK,
        "Website visit logged successfully",
        WebsiteItem::from(&visit),
    ))
}

pub async fn website_visits_today(
    user: AuthUser,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let visits = tracking.website_visits_today(viewer(user)).await?;
    let items: Vec<WebsiteItem> = visits.iter().map(WebsiteItem::from).collect();
    Ok(success_response(items))
}

pub async fn employee_dashboard(
    user: AuthUser,
    tracking: web::Data<TrackingService>,
) -> Result<HttpResponse, TrackerError> {
    let dashboard = tracking.employee_dashboard(user.id).await?;
    Ok(success_response(EmployeeDashboardResponse::from(&dashboard)))
}
