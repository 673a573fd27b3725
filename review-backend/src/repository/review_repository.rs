// src/repository/review_repository.rs
use crate::domain::review_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type ReviewRepository = CrudRepository<review_model::Entity>;

impl FilterColumns for review_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use review_model::Column;

        match name {
            "business_id" => Some(Column::BusinessId),
            "user_id" => Some(Column::UserId),
            "rating" => Some(Column::Rating),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
