//! Work session queries
//!
//! 每个员工每天最多一条记录，由 `uq_work_sessions_employee_date` 保证。

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_session;
use crate::errors::Result;
use crate::storage::models::WorkSession;

use migration::entities::work_session;

impl SeaOrmStorage {
    /// 当天没有记录时以 `clock_in` 新建，已有记录保持不变
    pub async fn ensure_session(
        &self,
        employee_id: i32,
        date: NaiveDate,
        clock_in: DateTime<Utc>,
    ) -> Result<WorkSession> {
        let active = work_session::ActiveModel {
            employee_id: Set(employee_id),
            clock_in: Set(clock_in),
            clock_out: Set(None),
            active_time: Set(0.0),
            idle_time: Set(0.0),
            productivity_score: Set(0),
            date: Set(date),
            ..Default::default()
        };

        // 冲突时把 employee_id 写回自身，等价于 DO NOTHING 且三种数据库都支持
        let inserted = work_session::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([work_session::Column::EmployeeId, work_session::Column::Date])
                    .update_column(work_session::Column::EmployeeId)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        debug!(
            "ensure_session(employee={}, date={}) rows_affected={}",
            employee_id, date, inserted
        );

        self.session_on(employee_id, date).await?.ok_or_else(|| {
            crate::errors::TrackerError::database_operation(format!(
                "Work session for employee {} on {} missing after upsert",
                employee_id, date
            ))
        })
    }

    /// 仅在 clock_out 为空时写入，重复登出不会覆盖第一次的时间
    pub async fn close_session(
        &self,
        employee_id: i32,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = work_session::Entity::update_many()
            .col_expr(work_session::Column::ClockOut, Expr::value(Some(at)))
            .filter(work_session::Column::EmployeeId.eq(employee_id))
            .filter(work_session::Column::Date.eq(date))
            .filter(work_session::Column::ClockOut.is_null())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// 写入或覆盖某天的统计数字（用于导入样例数据）
    pub async fn put_session_figures(
        &self,
        employee_id: i32,
        date: NaiveDate,
        clock_in: DateTime<Utc>,
        active_time: f64,
        idle_time: f64,
        productivity_score: i32,
    ) -> Result<()> {
        let active = work_session::ActiveModel {
            employee_id: Set(employee_id),
            clock_in: Set(clock_in),
            clock_out: Set(None),
            active_time: Set(active_time),
            idle_time: Set(idle_time),
            productivity_score: Set(productivity_score),
            date: Set(date),
            ..Default::default()
        };

        work_session::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([work_session::Column::EmployeeId, work_session::Column::Date])
                    .update_columns([
                        work_session::Column::ActiveTime,
                        work_session::Column::IdleTime,
                        work_session::Column::ProductivityScore,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    pub async fn session_on(&self, employee_id: i32, date: NaiveDate) -> Result<Option<WorkSession>> {
        let model = work_session::Entity::find()
            .filter(work_session::Column::EmployeeId.eq(employee_id))
            .filter(work_session::Column::Date.eq(date))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_session))
    }

    /// 某天所有员工的记录
    pub async fn sessions_on(&self, date: NaiveDate) -> Result<Vec<WorkSession>> {
        let models = work_session::Entity::find()
            .filter(work_session::Column::Date.eq(date))
            .order_by_asc(work_session::Column::EmployeeId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_session).collect())
    }

    /// `[start, end]` 闭区间
    pub async fn sessions_between(
        &self,
        employee_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkSession>> {
        let models = work_session::Entity::find()
            .filter(work_session::Column::EmployeeId.eq(employee_id))
            .filter(work_session::Column::Date.between(start, end))
            .order_by_asc(work_session::Column::Date)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_session).collect())
    }
}
