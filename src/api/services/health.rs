use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use crate::storage::SeaOrmStorage;

use super::error_code::ErrorCode;
use super::helpers::json_response;
use super::types::HealthResponse;

const HEALTH_MESSAGE: &str = "Employee Activity Tracker API is running";
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

/// Health Service
///
/// 直接 ping 数据库，不经过业务 service。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> HttpResponse {
        let start_time = Instant::now();
        trace!("Received health check request");

        let database_healthy = match tokio::time::timeout(DB_CHECK_TIMEOUT, storage.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!("Database health check failed: {}", e);
                false
            }
            Err(_) => {
                error!("Database health check timeout");
                false
            }
        };

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        let health = HealthResponse {
            status: if database_healthy { "ok" } else { "degraded" }.to_string(),
            message: HEALTH_MESSAGE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now.to_rfc3339(),
            database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            uptime,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        info!(
            "Health check completed in {:?}, database: {}, uptime: {}s",
            start_time.elapsed(),
            health.database,
            uptime
        );

        if database_healthy {
            json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(health))
        } else {
            json_response(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "Service Unavailable",
                Some(health),
            )
        }
    }
}
