//! App usage and website visit accumulation
//!
//! 同一 (员工, 名称, 日期) 只有一行，重复上报通过 ON CONFLICT 累加。

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::converters::{model_to_app_usage, model_to_website_visit};
use crate::errors::{Result, TrackerError};
use crate::storage::models::{AppUsage, WebsiteVisit};

use migration::entities::{app_usage, website_visit};

impl SeaOrmStorage {
    /// 累加应用使用时长；category 只在新建时写入
    pub async fn add_app_usage(
        &self,
        employee_id: i32,
        app_name: &str,
        duration: f64,
        category: &str,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<AppUsage> {
        let active = app_usage::ActiveModel {
            employee_id: Set(employee_id),
            app_name: Set(app_name.to_string()),
            duration: Set(duration),
            category: Set(Some(category.to_string())),
            date: Set(date),
            last_used: Set(at),
            ..Default::default()
        };

        app_usage::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    app_usage::Column::EmployeeId,
                    app_usage::Column::AppName,
                    app_usage::Column::Date,
                ])
                .value(
                    app_usage::Column::Duration,
                    Expr::col((app_usage::Entity, app_usage::Column::Duration)).add(duration),
                )
                .update_column(app_usage::Column::LastUsed)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        let model = app_usage::Entity::find()
            .filter(app_usage::Column::EmployeeId.eq(employee_id))
            .filter(app_usage::Column::AppName.eq(app_name))
            .filter(app_usage::Column::Date.eq(date))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                TrackerError::database_operation(format!(
                    "App usage row for '{}' missing after upsert",
                    app_name
                ))
            })?;
        Ok(model_to_app_usage(model))
    }

    /// 累加网站停留时长并把访问次数加一；新行 visits 从 1 开始
    pub async fn add_website_visit(
        &self,
        employee_id: i32,
        url: &str,
        duration: f64,
        category: &str,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<WebsiteVisit> {
        let active = website_visit::ActiveModel {
            employee_id: Set(employee_id),
            url: Set(url.to_string()),
            duration: Set(duration),
            visits: Set(1),
            category: Set(Some(category.to_string())),
            date: Set(date),
            last_visited: Set(at),
            ..Default::default()
        };

        website_visit::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    website_visit::Column::EmployeeId,
                    website_visit::Column::Url,
                    website_visit::Column::Date,
                ])
                .value(
                    website_visit::Column::Duration,
                    Expr::col((website_visit::Entity, website_visit::Column::Duration))
                        .add(duration),
                )
                .value(
                    website_visit::Column::Visits,
                    Expr::col((website_visit::Entity, website_visit::Column::Visits)).add(1),
                )
                .update_column(website_visit::Column::LastVisited)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        let model = website_visit::Entity::find()
            .filter(website_visit::Column::EmployeeId.eq(employee_id))
            .filter(website_visit::Column::Url.eq(url))
            .filter(website_visit::Column::Date.eq(date))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                TrackerError::database_operation(format!(
                    "Website visit row for '{}' missing after upsert",
                    url
                ))
            })?;
        Ok(model_to_website_visit(model))
    }

    /// 写入或覆盖一行网站访问统计（用于导入样例数据）
    pub async fn put_website_visit(
        &self,
        employee_id: i32,
        url: &str,
        duration: f64,
        visits: i32,
        category: &str,
        date: NaiveDate,
    ) -> Result<()> {
        let active = website_visit::ActiveModel {
            employee_id: Set(employee_id),
            url: Set(url.to_string()),
            duration: Set(duration),
            visits: Set(visits),
            category: Set(Some(category.to_string())),
            date: Set(date),
            last_visited: Set(Utc::now()),
            ..Default::default()
        };

        website_visit::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    website_visit::Column::EmployeeId,
                    website_visit::Column::Url,
                    website_visit::Column::Date,
                ])
                .update_columns([
                    website_visit::Column::Duration,
                    website_visit::Column::Visits,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    /// 某天的应用使用；`employee_id` 为 None 时返回全部员工
    pub async fn app_usage_on(
        &self,
        date: NaiveDate,
        employee_id: Option<i32>,
    ) -> Result<Vec<AppUsage>> {
        let mut query = app_usage::Entity::find().filter(app_usage::Column::Date.eq(date));
        if let Some(id) = employee_id {
            query = query.filter(app_usage::Column::EmployeeId.eq(id));
        }
        let models = query
            .order_by_asc(app_usage::Column::EmployeeId)
            .order_by_asc(app_usage::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_app_usage).collect())
    }

    pub async fn website_visits_on(
        &self,
        date: NaiveDate,
        employee_id: Option<i32>,
    ) -> Result<Vec<WebsiteVisit>> {
        let mut query =
            website_visit::Entity::find().filter(website_visit::Column::Date.eq(date));
        if let Some(id) = employee_id {
            query = query.filter(website_visit::Column::EmployeeId.eq(id));
        }
        let models = query
            .order_by_asc(website_visit::Column::EmployeeId)
            .order_by_asc(website_visit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_website_visit).collect())
    }

    /// `[start, end]` 闭区间
    pub async fn app_usage_between(
        &self,
        employee_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AppUsage>> {
        let models = app_usage::Entity::find()
            .filter(app_usage::Column::EmployeeId.eq(employee_id))
            .filter(app_usage::Column::Date.between(start, end))
            .order_by_asc(app_usage::Column::Date)
            .order_by_asc(app_usage::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_app_usage).collect())
    }

    /// `[start, end]` 闭区间
    pub async fn website_visits_between(
        &self,
        employee_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WebsiteVisit>> {
        let models = website_visit::Entity::find()
            .filter(website_visit::Column::EmployeeId.eq(employee_id))
            .filter(website_visit::Column::Date.between(start, end))
            .order_by_asc(website_visit::Column::Date)
            .order_by_asc(website_visit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_website_visit).collect())
    }
}
