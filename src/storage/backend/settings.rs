use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, EntityTrait};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_settings;
use crate::errors::Result;
use crate::storage::models::TrackerSettings;

use migration::entities::settings;

impl SeaOrmStorage {
    /// 尚未保存过时返回 None
    pub async fn load_settings(&self) -> Result<Option<TrackerSettings>> {
        let model = settings::Entity::find_by_id(settings::SINGLETON_ID)
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_settings))
    }

    /// 写入唯一一行（id = 1），并刷新 updated_at
    pub async fn save_settings(&self, values: &TrackerSettings) -> Result<TrackerSettings> {
        let now = Utc::now();
        let active = settings::ActiveModel {
            id: Set(settings::SINGLETON_ID),
            work_start: Set(values.work_start),
            work_end: Set(values.work_end),
            idle_timeout: Set(values.idle_timeout),
            updated_at: Set(now),
        };

        settings::Entity::insert(active)
            .on_conflict(
                OnConflict::column(settings::Column::Id)
                    .update_columns([
                        settings::Column::WorkStart,
                        settings::Column::WorkEnd,
                        settings::Column::IdleTimeout,
                        settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        info!(
            "Settings saved: {}-{}, idle_timeout={}min",
            values.work_start.format("%H:%M"),
            values.work_end.format("%H:%M"),
            values.idle_timeout
        );

        Ok(TrackerSettings {
            updated_at: Some(now),
            ..values.clone()
        })
    }
}
