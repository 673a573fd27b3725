// src/repository/report_repository.rs
use crate::domain::report_model;
use crate::repository::crud::{CrudRepository, FilterColumns};

pub type ReportRepository = CrudRepository<report_model::Entity>;

impl FilterColumns for report_model::Entity {
    fn filter_column(name: &str) -> Option<Self::Column> {
        use report_model::Column;

        match name {
            "reporter_id" => Some(Column::ReporterId),
            "target_type" => Some(Column::TargetType),
            "target_id" => Some(Column::TargetId),
            "status" => Some(Column::Status),
            "created_at" => Some(Column::CreatedAt),
            "updated_at" => Some(Column::UpdatedAt),
            _ => None,
        }
    }
}
