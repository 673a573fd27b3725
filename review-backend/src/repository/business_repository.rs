// src/repository/business_repository.rs
use crate::domain::business_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type BusinessRepository = CrudRepository<business_model::Entity>;

impl FilterColumns for business_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use business_model::Column;

        match name {
            "owner_id" => Some(Column::OwnerId),
            "name" => Some(Column::Name),
            "category" => Some(Column::Category),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
