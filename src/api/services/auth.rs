//! 登录与登出

use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::trace;

use crate::api::middleware::AuthUser;
use crate::errors::TrackerError;
use crate::services::AuthService;

use super::helpers::success_response;
use super::types::{LoginRequest, LoginResponse};

pub async fn admin_login(
    body: web::Json<LoginRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, TrackerError> {
    trace!("Admin login attempt for '{}'", body.username);
    let login = auth.admin_login(&body.username, &body.password).await?;
    Ok(success_response(LoginResponse::admin(login.token, &login.admin)))
}

/// 员工登录即上班打卡
pub async fn employee_login(
    body: web::Json<LoginRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, TrackerError> {
    trace!("Employee login attempt for '{}'", body.username);
    let login = auth.employee_login(&body.username, &body.password).await?;
    Ok(success_response(LoginResponse::employee(
        login.token,
        &login.employee,
    )))
}

pub async fn logout(
    user: AuthUser,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, TrackerError> {
    auth.logout(user.id, user.role).await?;
    Ok(success_response(json!({ "message": "Logged out successfully" })))
}
