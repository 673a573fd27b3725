// src/repository/session_repository.rs
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};

use crate::domain::session_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type SessionRepository = CrudRepository<session_model::Entity>;

impl FilterColumns for session_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use session_model::Column;

        match name {
            "user_id" => Some(Column::UserId),
            "expires_at" => Some(Column::ExpiresAt),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}

impl CrudRepository<session_model::Entity> {
    pub async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<session_model::Model>, DbErr> {
        session_model::Entity::find()
            .filter(session_model::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
    }

    /// ログアウト時に使用。削除した行数を返す。
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<u64, DbErr> {
        let result = session_model::Entity::delete_many()
            .filter(session_model::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
