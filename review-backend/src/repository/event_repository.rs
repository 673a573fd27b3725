// src/repository/event_repository.rs
use crate::domain::event_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type EventRepository = CrudRepository<event_model::Entity>;

impl FilterColumns for event_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use event_model::Column;

        match name {
            "business_id" => Some(Column::BusinessId),
            "name" => Some(Column::Name),
            "starts_at" => Some(Column::StartsAt),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
