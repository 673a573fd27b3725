use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Businesses::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Businesses::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Businesses::Description).text().null())
                    .col(
                        ColumnDef::new(Businesses::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Businesses::Address).text().not_null())
                    .col(ColumnDef::new(Businesses::Phone).string_len(30).null())
                    .col(ColumnDef::new(Businesses::Photos).text().null())
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Businesses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_businesses_owner_id")
                    .from(Businesses::Table, Businesses::OwnerId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Businesses::Table)
                    .name("idx_businesses_owner_id")
                    .col(Businesses::OwnerId)
                    .to_owned(),
            )
            .await?;

        // カテゴリでの絞り込み用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Businesses::Table)
                    .name("idx_businesses_category")
                    .col(Businesses::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Businesses::Table)
                    .name("idx_businesses_category")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Businesses::Table)
                    .name("idx_businesses_owner_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Businesses {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Category,
    Address,
    Phone,
    Photos,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
