use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// 一覧クエリのデフォルトソートは created_at DESC なので、
// 各テーブルの created_at にインデックスを張る。
const TABLES: &[&str] = &[
    "users",
    "businesses",
    "reviews",
    "events",
    "event_participants",
    "reports",
    "notifications",
    "sessions",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .table(Alias::new(*table))
                        .name(format!("idx_{}_created_at", table))
                        .col(Alias::new("created_at"))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .table(Alias::new(*table))
                        .name(format!("idx_{}_created_at", table))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
