// src/repository/notification_repository.rs
use crate::domain::notification_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type NotificationRepository = CrudRepository<notification_model::Entity>;

impl FilterColumns for notification_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use notification_model::Column;

        match name {
            "user_id" => Some(Column::UserId),
            "is_read" => Some(Column::IsRead),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
