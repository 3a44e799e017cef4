//! 唯一约束与查询索引
//!
//! - work_sessions(employee_id, date): 每个员工每天一条会话
//! - app_usage(employee_id, app_name, date) / website_visits(employee_id, url, date):
//!   使用记录按天累加，配合 ON CONFLICT upsert 使用
//! - activity_logs(timestamp) / activity_logs(employee_id, timestamp): 最近活动与时间线查询

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_work_sessions_employee_date")
                    .table(WorkSessions::Table)
                    .col(WorkSessions::EmployeeId)
                    .col(WorkSessions::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_app_usage_employee_app_date")
                    .table(AppUsage::Table)
                    .col(AppUsage::EmployeeId)
                    .col(AppUsage::AppName)
                    .col(AppUsage::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_website_visits_employee_url_date")
                    .table(WebsiteVisits::Table)
                    .col(WebsiteVisits::EmployeeId)
                    .col(WebsiteVisits::Url)
                    .col(WebsiteVisits::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_timestamp")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_logs_employee_time")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::EmployeeId)
                    .col(ActivityLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_work_sessions_date")
                    .table(WorkSessions::Table)
                    .col(WorkSessions::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_work_sessions_date",
            "idx_activity_logs_employee_time",
            "idx_activity_logs_timestamp",
            "uq_website_visits_employee_url_date",
            "uq_app_usage_employee_app_date",
            "uq_work_sessions_employee_date",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum WorkSessions {
    #[sea_orm(iden = "work_sessions")]
    Table,
    EmployeeId,
    Date,
}

#[derive(DeriveIden)]
enum AppUsage {
    #[sea_orm(iden = "app_usage")]
    Table,
    EmployeeId,
    AppName,
    Date,
}

#[derive(DeriveIden)]
enum WebsiteVisits {
    #[sea_orm(iden = "website_visits")]
    Table,
    EmployeeId,
    Url,
    Date,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    #[sea_orm(iden = "activity_logs")]
    Table,
    EmployeeId,
    Timestamp,
}
