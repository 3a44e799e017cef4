//! Admin and employee account queries

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::info;

use super::converters::{model_to_admin, model_to_employee};
use super::{SeaOrmStorage, map_unique_violation};
use crate::errors::{Result, TrackerError};
use crate::storage::models::{Admin, Employee, EmployeeChanges, EmployeeStatus, NewEmployee};

use migration::entities::{admin, employee};

impl SeaOrmStorage {
    // ============ admins ============

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_admin))
    }

    pub async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<Admin> {
        let active = admin::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_hash.to_string()),
            email: Set(email.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, "Admin username or email already exists"))?;

        info!("Admin account created: {}", model.username);
        Ok(model_to_admin(model))
    }

    /// 返回 false 表示用户名不存在
    pub async fn update_admin_password(&self, username: &str, password_hash: &str) -> Result<bool> {
        let result = admin::Entity::update_many()
            .col_expr(admin::Column::Password, Expr::value(password_hash))
            .filter(admin::Column::Username.eq(username))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ============ employees ============

    pub async fn find_employee(&self, id: i32) -> Result<Option<Employee>> {
        let model = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_employee))
    }

    /// 只查启用中的账号，停用账号无法登录
    pub async fn find_active_employee_by_username(&self, username: &str) -> Result<Option<Employee>> {
        let model = employee::Entity::find()
            .filter(employee::Column::Username.eq(username))
            .filter(employee::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_employee))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let models = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_employee).collect())
    }

    pub async fn employee_username_exists(&self, username: &str) -> Result<bool> {
        let count = employee::Entity::find()
            .filter(employee::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// `exclude_id` 用于更新时排除自身
    pub async fn employee_email_exists(&self, email: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query = employee::Entity::find().filter(employee::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(employee::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    pub async fn insert_employee(&self, new: NewEmployee) -> Result<Employee> {
        let active = employee::ActiveModel {
            username: Set(new.username),
            password: Set(new.password_hash),
            name: Set(new.name),
            email: Set(new.email),
            department: Set(new.department),
            position: Set(new.position),
            status: Set(EmployeeStatus::Offline.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, "Username or email already exists"))?;

        info!("Employee created: {} (id={})", model.username, model.id);
        Ok(model_to_employee(model))
    }

    pub async fn update_employee(&self, id: i32, changes: EmployeeChanges) -> Result<Employee> {
        let model = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| TrackerError::not_found("Employee not found!"))?;

        if changes.is_empty() {
            return Ok(model_to_employee(model));
        }

        let mut active: employee::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(department) = changes.department {
            active.department = Set(department);
        }
        if let Some(position) = changes.position {
            active.position = Set(position);
        }
        if let Some(hash) = changes.password_hash {
            active.password = Set(hash);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, "Email already exists"))?;

        info!("Employee updated: id={}", id);
        Ok(model_to_employee(updated))
    }

    /// 返回 false 表示员工不存在
    pub async fn deactivate_employee(&self, id: i32) -> Result<bool> {
        let result = employee::Entity::update_many()
            .col_expr(employee::Column::IsActive, Expr::value(false))
            .filter(employee::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Employee deactivated: id={}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn set_employee_status(&self, id: i32, status: EmployeeStatus) -> Result<()> {
        employee::Entity::update_many()
            .col_expr(employee::Column::Status, Expr::value(status.to_string()))
            .filter(employee::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// 登录成功：记录时间并置为 online
    pub async fn record_employee_login(&self, id: i32, at: DateTime<Utc>) -> Result<()> {
        employee::Entity::update_many()
            .col_expr(employee::Column::LastLogin, Expr::value(Some(at)))
            .col_expr(
                employee::Column::Status,
                Expr::value(EmployeeStatus::Online.to_string()),
            )
            .filter(employee::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn count_online_employees(&self) -> Result<u64> {
        let count = employee::Entity::find()
            .filter(employee::Column::Status.eq(EmployeeStatus::Online.to_string()))
            .filter(employee::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
