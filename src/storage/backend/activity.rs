//! Activity log reads and appends

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::SeaOrmStorage;
use super::converters::model_to_activity;
use crate::errors::Result;
use crate::storage::models::{ActivityEntry, ActivityWithEmployee};

use migration::entities::{activity_log, employee};

impl SeaOrmStorage {
    pub async fn append_activity(
        &self,
        employee_id: i32,
        activity_type: &str,
        description: Option<String>,
        metadata: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<ActivityEntry> {
        let active = activity_log::ActiveModel {
            employee_id: Set(employee_id),
            activity_type: Set(activity_type.to_string()),
            description: Set(description),
            timestamp: Set(at),
            metadata: Set(metadata),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(model_to_activity(model))
    }

    /// 最近的活动，新的在前；`employee_id` 为 None 时返回全部员工
    pub async fn recent_activities(
        &self,
        employee_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<ActivityWithEmployee>> {
        let mut query = activity_log::Entity::find();
        if let Some(id) = employee_id {
            query = query.filter(activity_log::Column::EmployeeId.eq(id));
        }

        let rows = query
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .find_also_related(employee::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(log, emp)| ActivityWithEmployee {
                employee_name: emp.map(|e| e.name).unwrap_or_default(),
                entry: model_to_activity(log),
            })
            .collect())
    }

    /// `[from, until)` 区间内的活动，旧的在前
    pub async fn activities_between(
        &self,
        employee_id: i32,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ActivityEntry>> {
        let models = activity_log::Entity::find()
            .filter(activity_log::Column::EmployeeId.eq(employee_id))
            .filter(activity_log::Column::Timestamp.gte(from))
            .filter(activity_log::Column::Timestamp.lt(until))
            .order_by_asc(activity_log::Column::Timestamp)
            .order_by_asc(activity_log::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_activity).collect())
    }
}
