pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users_table;
mod m20250801_000002_create_profile_tables;
mod m20250801_000003_create_projects_tables;
mod m20250801_000004_create_portfolios_table;
mod m20250801_000005_create_portfolio_relations;
mod m20250801_000006_create_portfolio_likes_table;
mod m20250815_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users_table::Migration),
            Box::new(m20250801_000002_create_profile_tables::Migration),
            Box::new(m20250801_000003_create_projects_tables::Migration),
            Box::new(m20250801_000004_create_portfolios_table::Migration),
            Box::new(m20250801_000005_create_portfolio_relations::Migration),
            Box::new(m20250801_000006_create_portfolio_likes_table::Migration),
            Box::new(m20250815_000001_add_indexes::Migration),
        ]
    }
}
