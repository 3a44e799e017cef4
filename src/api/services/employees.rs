//! 员工管理（管理员）

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::info;

use crate::errors::TrackerError;
use crate::services::EmployeeService;

use super::helpers::{success_response, success_with_message};
use super::types::{CreateEmployeeRequest, CreatedEmployee, EmployeeListItem, UpdateEmployeeRequest};

pub async fn list_employees(
    employees: web::Data<EmployeeService>,
) -> Result<HttpResponse, TrackerError> {
    let overview = employees.list_with_today().await?;
    let items: Vec<EmployeeListItem> = overview.iter().map(EmployeeListItem::from).collect();
    Ok(success_response(items))
}

pub async fn create_employee(
    body: web::Json<CreateEmployeeRequest>,
    employees: web::Data<EmployeeService>,
) -> Result<HttpResponse, TrackerError> {
    let employee = employees.create(body.into_inner().into()).await?;
    info!("Admin API: employee '{}' created", employee.username);
    Ok(success_with_message(
        StatusCode::CREATED,
        "Employee created successfully!",
        json!({ "employee": CreatedEmployee::from(&employee) }),
    ))
}

pub async fn update_employee(
    path: web::Path<i32>,
    body: web::Json<UpdateEmployeeRequest>,
    employees: web::Data<EmployeeService>,
) -> Result<HttpResponse, TrackerError> {
    let id = path.into_inner();
    let employee = employees.update(id, body.into_inner().into()).await?;
    Ok(success_with_message(
        StatusCode::OK,
        "Employee updated successfully!",
        CreatedEmployee::from(&employee),
    ))
}

/// 软删除：只置 is_active = false
pub async fn deactivate_employee(
    path: web::Path<i32>,
    employees: web::Data<EmployeeService>,
) -> Result<HttpResponse, TrackerError> {
    let id = path.into_inner();
    employees.deactivate(id).await?;
    info!("Admin API: employee {} deactivated", id);
    Ok(success_with_message(
        StatusCode::OK,
        "Employee deactivated successfully!",
        json!({ "id": id }),
    ))
}
