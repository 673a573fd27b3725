// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// マイグレーションモジュール
mod m20250805_000001_create_users_table;
mod m20250805_000002_create_businesses_table;
mod m20250805_000003_create_reviews_table;
mod m20250805_000004_create_events_table;
mod m20250805_000005_create_event_participants_table;
mod m20250805_000006_create_reports_table;
mod m20250805_000007_create_notifications_table;
mod m20250805_000008_create_sessions_table;
mod m20250806_000001_add_list_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250805_000001_create_users_table::Migration),
            Box::new(m20250805_000002_create_businesses_table::Migration),
            Box::new(m20250805_000003_create_reviews_table::Migration),
            Box::new(m20250805_000004_create_events_table::Migration),
            Box::new(m20250805_000005_create_event_participants_table::Migration),
            Box::new(m20250805_000006_create_reports_table::Migration),
            Box::new(m20250805_000007_create_notifications_table::Migration),
            Box::new(m20250805_000008_create_sessions_table::Migration),
            Box::new(m20250806_000001_add_list_indexes::Migration),
        ]
    }
}
