// src/api/dto/auth_dto.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::user_dto::UserDto;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct RegisterDto {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct LoginDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponseDto {
    pub access_token: String,
    pub user: UserDto,
}
