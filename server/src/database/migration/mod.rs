//! Database migrations.

pub use sea_orm_migration::*;

mod m20240301_000001_create_users_table;
mod m20240301_000002_create_countries_table;
mod m20240301_000003_create_advice_table;
mod m20240301_000004_create_country_advice_table;
mod m20240301_000005_create_user_votes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users_table::Migration),
            Box::new(m20240301_000002_create_countries_table::Migration),
            Box::new(m20240301_000003_create_advice_table::Migration),
            Box::new(m20240301_000004_create_country_advice_table::Migration),
            Box::new(m20240301_000005_create_user_votes_table::Migration),
        ]
    }
}
