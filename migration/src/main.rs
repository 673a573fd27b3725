// migration/src/main.rs
use migration::Migrator;
use sea_orm_migration::prelude::*;

// マイグレーションの実行には非同期ランタイムが必要
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
