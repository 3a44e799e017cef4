pub mod activity_log;
pub mod admin;
pub mod app_usage;
pub mod employee;
pub mod settings;
pub mod website_visit;
pub mod work_session;

pub use activity_log::Entity as ActivityLogEntity;
pub use admin::Entity as AdminEntity;
pub use app_usage::Entity as AppUsageEntity;
pub use employee::Entity as EmployeeEntity;
pub use settings::Entity as SettingsEntity;
pub use website_visit::Entity as WebsiteVisitEntity;
pub use work_session::Entity as WorkSessionEntity;
