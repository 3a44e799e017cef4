//! 初始表结构
//!
//! 创建管理员、员工、活动日志、工作会话、应用使用、网站访问和设置表。
//! 所有活动/使用记录通过外键关联到 employees。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::Password).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::Username)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::Password)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Department).string_len(80).null())
                    .col(ColumnDef::new(Employees::Position).string_len(80).null())
                    .col(
                        ColumnDef::new(Employees::Status)
                            .string_len(20)
                            .not_null()
                            .default("offline"),
                    )
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::ActivityType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::Description)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ActivityLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityLogs::Metadata).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_employee")
                            .from(ActivityLogs::Table, ActivityLogs::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::ClockIn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::ClockOut)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::ActiveTime)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::IdleTime)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(WorkSessions::ProductivityScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(WorkSessions::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_sessions_employee")
                            .from(WorkSessions::Table, WorkSessions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUsage::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppUsage::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(AppUsage::AppName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(AppUsage::Duration)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(AppUsage::Category).string_len(20).null())
                    .col(ColumnDef::new(AppUsage::Date).date().not_null())
                    .col(
                        ColumnDef::new(AppUsage::LastUsed)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_usage_employee")
                            .from(AppUsage::Table, AppUsage::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WebsiteVisits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebsiteVisits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WebsiteVisits::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebsiteVisits::Url).string_len(500).not_null())
                    .col(
                        ColumnDef::new(WebsiteVisits::Duration)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(WebsiteVisits::Visits)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(WebsiteVisits::Category)
                            .string_len(20)
                            .null(),
                    )
                    .col(ColumnDef::new(WebsiteVisits::Date).date().not_null())
                    .col(
                        ColumnDef::new(WebsiteVisits::LastVisited)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_website_visits_employee")
                            .from(WebsiteVisits::Table, WebsiteVisits::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::WorkStart).time().not_null())
                    .col(ColumnDef::new(Settings::WorkEnd).time().not_null())
                    .col(
                        ColumnDef::new(Settings::IdleTimeout)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Settings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 先删除依赖 employees 的表
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WebsiteVisits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppUsage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Username,
    Password,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    Username,
    Password,
    Name,
    Email,
    Department,
    Position,
    Status,
    IsActive,
    CreatedAt,
    LastLogin,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    #[sea_orm(iden = "activity_logs")]
    Table,
    Id,
    EmployeeId,
    ActivityType,
    Description,
    Timestamp,
    Metadata,
}

#[derive(DeriveIden)]
enum WorkSessions {
    #[sea_orm(iden = "work_sessions")]
    Table,
    Id,
    EmployeeId,
    ClockIn,
    ClockOut,
    ActiveTime,
    IdleTime,
    ProductivityScore,
    Date,
}

#[derive(DeriveIden)]
enum AppUsage {
    #[sea_orm(iden = "app_usage")]
    Table,
    Id,
    EmployeeId,
    AppName,
    Duration,
    Category,
    Date,
    LastUsed,
}

#[derive(DeriveIden)]
enum WebsiteVisits {
    #[sea_orm(iden = "website_visits")]
    Table,
    Id,
    EmployeeId,
    Url,
    Duration,
    Visits,
    Category,
    Date,
    LastVisited,
}

#[derive(DeriveIden)]
enum Settings {
    #[sea_orm(iden = "settings")]
    Table,
    Id,
    WorkStart,
    WorkEnd,
    IdleTimeout,
    UpdatedAt,
}
