//! 管理员总览、报表与时间线

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use tracing::info;

use crate::errors::TrackerError;
use crate::services::ReportService;

use super::helpers::success_response;
use super::types::{DashboardResponse, DateRangeQuery, ReportResponse, TimelineItem};

pub async fn dashboard(reports: web::Data<ReportService>) -> Result<HttpResponse, TrackerError> {
    let stats = reports.dashboard().await?;
    Ok(success_response(DashboardResponse::from(&stats)))
}

pub async fn employee_report(
    path: web::Path<i32>,
    query: web::Query<DateRangeQuery>,
    reports: web::Data<ReportService>,
) -> Result<HttpResponse, TrackerError> {
    let report = reports
        .employee_report(
            path.into_inner(),
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await?;
    Ok(success_response(ReportResponse::from(&report)))
}

/// PDF 下载，不走 JSON 信封
pub async fn download_report(
    path: web::Path<i32>,
    query: web::Query<DateRangeQuery>,
    reports: web::Data<ReportService>,
) -> Result<HttpResponse, TrackerError> {
    let id = path.into_inner();
    let rendered = reports
        .render_pdf(id, query.start_date.as_deref(), query.end_date.as_deref())
        .await?;

    info!("Admin API: sending {} for employee {}", rendered.file_name, id);
    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(rendered.file_name)],
        })
        .body(rendered.bytes))
}

pub async fn timeline(
    path: web::Path<i32>,
    query: web::Query<DateRangeQuery>,
    reports: web::Data<ReportService>,
) -> Result<HttpResponse, TrackerError> {
    let entries = reports
        .timeline(
            path.into_inner(),
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await?;
    let items: Vec<TimelineItem> = entries.iter().map(TimelineItem::from).collect();
    Ok(success_response(items))
}
