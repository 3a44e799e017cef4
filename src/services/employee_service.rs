//! Employee management

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::{Result, TrackerError};
use crate::storage::{Employee, EmployeeChanges, NewEmployee, SeaOrmStorage, WorkSession};
use crate::utils::password::{hash_password, process_update_password};
use crate::utils::time::today;

/// Request to create a new employee
#[derive(Debug, Clone, Default)]
pub struct CreateEmployeeInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Partial update; None keeps the current value, `Some(None)` clears
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<Option<String>>,
    pub position: Option<Option<String>>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// 员工及其当天的工作时段
#[derive(Debug, Clone)]
pub struct EmployeeOverview {
    pub employee: Employee,
    pub today: Option<WorkSession>,
}

pub struct EmployeeService {
    storage: Arc<SeaOrmStorage>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TrackerError::validation(format!("{} is required", field))),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EmployeeService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: i32) -> Result<Employee> {
        self.storage
            .find_employee(id)
            .await?
            .ok_or_else(|| TrackerError::not_found("Employee not found!"))
    }

    /// 所有员工（含已停用）及当天统计
    pub async fn list_with_today(&self) -> Result<Vec<EmployeeOverview>> {
        let employees = self.storage.list_employees().await?;
        let sessions = self.storage.sessions_on(today()).await?;

        Ok(employees
            .into_iter()
            .map(|employee| {
                let today = sessions
                    .iter()
                    .find(|s| s.employee_id == employee.id)
                    .cloned();
                EmployeeOverview { employee, today }
            })
            .collect())
    }

    pub async fn create(&self, input: CreateEmployeeInput) -> Result<Employee> {
        let username = required(input.username, "username")?;
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| TrackerError::validation("password is required"))?;
        let name = required(input.name, "name")?;
        let email = required(input.email, "email")?;

        if self.storage.employee_username_exists(&username).await? {
            return Err(TrackerError::validation("Username already exists!"));
        }
        if self.storage.employee_email_exists(&email, None).await? {
            return Err(TrackerError::validation("Email already exists!"));
        }

        let password_hash = hash_password(&password).map_err(|e| {
            error!("Failed to hash password: {}", e);
            TrackerError::from(e)
        })?;

        self.storage
            .insert_employee(NewEmployee {
                username,
                password_hash,
                name,
                email,
                department: optional(input.department),
                position: optional(input.position),
            })
            .await
    }

    pub async fn update(&self, id: i32, input: UpdateEmployeeInput) -> Result<Employee> {
        // 先确认存在，保证 404 优先于字段校验
        self.get(id).await?;

        let email = match input.email {
            Some(email) => {
                let email = email.trim().to_string();
                if email.is_empty() {
                    return Err(TrackerError::validation("email must not be empty"));
                }
                if self.storage.employee_email_exists(&email, Some(id)).await? {
                    return Err(TrackerError::validation("Email already exists!"));
                }
                Some(email)
            }
            None => None,
        };

        let name = match input.name {
            Some(name) if name.trim().is_empty() => {
                return Err(TrackerError::validation("name must not be empty"));
            }
            other => other.map(|n| n.trim().to_string()),
        };

        let password_hash = process_update_password(input.password.as_deref())?;

        self.storage
            .update_employee(
                id,
                EmployeeChanges {
                    name,
                    email,
                    department: input.department.map(optional),
                    position: input.position.map(optional),
                    password_hash,
                    is_active: input.is_active,
                },
            )
            .await
    }

    /// 软删除：is_active = false，之后无法登录
    pub async fn deactivate(&self, id: i32) -> Result<()> {
        if !self.storage.deactivate_employee(id).await? {
            return Err(TrackerError::not_found("Employee not found!"));
        }
        info!("Employee id={} can no longer log in", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(
            required(Some("  jdoe ".to_string()), "username").unwrap(),
            "jdoe"
        );
        assert!(required(Some("   ".to_string()), "username").is_err());
        assert!(required(None, "username").is_err());
    }

    #[test]
    fn test_optional_drops_blank() {
        assert_eq!(optional(Some("".to_string())), None);
        assert_eq!(
            optional(Some(" Eng ".to_string())),
            Some("Eng".to_string())
        );
    }
}
