// src/repository/event_participant_repository.rs
use crate::domain::event_participant_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type EventParticipantRepository = CrudRepository<event_participant_model::Entity>;

impl FilterColumns for event_participant_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use event_participant_model::Column;

        match name {
            "event_id" => Some(Column::EventId),
            "user_id" => Some(Column::UserId),
            "status" => Some(Column::Status),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
