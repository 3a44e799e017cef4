//! Login and logout
//!
//! 员工登录即上班打卡，登出即下班打卡。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::api::jwt::JwtService;
use crate::errors::{Result, TrackerError};
use crate::storage::{Admin, Employee, EmployeeStatus, Role, SeaOrmStorage};
use crate::utils::password::verify_password;
use crate::utils::time::today;

pub const CLOCK_IN_ACTIVITY: &str = "clockin";
pub const CLOCK_OUT_ACTIVITY: &str = "clockout";

const INVALID_CREDENTIALS: &str = "Invalid credentials!";

/// Result of a successful admin login
#[derive(Debug, Clone)]
pub struct AdminLogin {
    pub token: String,
    pub admin: Admin,
}

/// Result of a successful employee login
#[derive(Debug, Clone)]
pub struct EmployeeLogin {
    pub token: String,
    pub employee: Employee,
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>, jwt: Arc<JwtService>) -> Self {
        Self { storage, jwt }
    }

    fn issue_token(&self, id: i32, role: Role) -> Result<String> {
        self.jwt
            .generate_token(id, role)
            .map_err(|e| TrackerError::token_generation(e.to_string()))
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AdminLogin> {
        let admin = match self.storage.find_admin_by_username(username).await? {
            Some(admin) if verify_password(password, &admin.password_hash) => admin,
            _ => {
                warn!("Admin login failed for '{}'", username);
                return Err(TrackerError::auth_failed(INVALID_CREDENTIALS));
            }
        };

        let token = self.issue_token(admin.id, Role::Admin)?;
        info!("Admin '{}' logged in", admin.username);
        Ok(AdminLogin { token, admin })
    }

    /// 校验通过后：记录登录时间并置为 online，写入 clockin 活动，确保当天有工作时段
    pub async fn employee_login(&self, username: &str, password: &str) -> Result<EmployeeLogin> {
        let employee = match self.storage.find_active_employee_by_username(username).await? {
            Some(employee) if verify_password(password, &employee.password_hash) => employee,
            _ => {
                warn!("Employee login failed for '{}'", username);
                return Err(TrackerError::auth_failed(INVALID_CREDENTIALS));
            }
        };

        let now = Utc::now();
        self.storage.record_employee_login(employee.id, now).await?;
        self.storage
            .append_activity(
                employee.id,
                CLOCK_IN_ACTIVITY,
                Some("Clocked in".to_string()),
                None,
                now,
            )
            .await?;
        self.storage.ensure_session(employee.id, today(), now).await?;

        let token = self.issue_token(employee.id, Role::Employee)?;
        info!("Employee '{}' clocked in", employee.username);

        Ok(EmployeeLogin {
            token,
            employee: Employee {
                status: EmployeeStatus::Online,
                last_login: Some(now),
                ..employee
            },
        })
    }

    /// 管理员登出不做任何事；员工登出置 offline、写 clockout 活动、关闭当天时段
    pub async fn logout(&self, subject_id: i32, role: Role) -> Result<()> {
        if role != Role::Employee {
            return Ok(());
        }

        if self.storage.find_employee(subject_id).await?.is_none() {
            return Err(TrackerError::not_found("Employee not found!"));
        }

        let now = Utc::now();
        self.storage
            .set_employee_status(subject_id, EmployeeStatus::Offline)
            .await?;
        self.storage
            .append_activity(
                subject_id,
                CLOCK_OUT_ACTIVITY,
                Some("Clocked out".to_string()),
                None,
                now,
            )
            .await?;
        let closed = self.storage.close_session(subject_id, today(), now).await?;

        info!(
            "Employee id={} clocked out (session closed: {})",
            subject_id, closed
        );
        Ok(())
    }
}
