use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id hash
    pub password: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    /// online / idle / offline
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub last_login: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLog,
    #[sea_orm(has_many = "super::work_session::Entity")]
    WorkSession,
    #[sea_orm(has_many = "super::app_usage::Entity")]
    AppUsage,
    #[sea_orm(has_many = "super::website_visit::Entity")]
    WebsiteVisit,
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl Related<super::work_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkSession.def()
    }
}

impl Related<super::app_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUsage.def()
    }
}

impl Related<super::website_visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WebsiteVisit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
