// src/repository/user_repository.rs
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};

use crate::domain::user_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type UserRepository = CrudRepository<user_model::Entity>;

impl FilterColumns for user_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use user_model::Column;

        match name {
            "username" => Some(Column::Username),
            "email" => Some(Column::Email),
            "role" => Some(Column::Role),
            "is_active" => Some(Column::IsActive),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}

impl CrudRepository<user_model::Entity> {
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user_model::Model>, DbErr> {
        user_model::Entity::find()
            .filter(user_model::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user_model::Model>, DbErr> {
        user_model::Entity::find()
            .filter(user_model::Column::Username.eq(username))
            .one(&self.db)
            .await
    }
}
