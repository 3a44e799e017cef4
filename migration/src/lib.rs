pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261018_000001_initial_schema;
mod m20261018_000002_tracking_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_initial_schema::Migration),
            Box::new(m20261018_000002_tracking_indexes::Migration),
        ]
    }
}
