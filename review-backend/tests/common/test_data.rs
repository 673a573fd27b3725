// tests/common/test_data.rs
//
// MockDatabaseに積む固定フィクスチャ。IDは決め打ちで、
// aliceが認証済みユーザーに対応する。

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use review_backend::domain::{business_model, review_model, session_model, user_model};

pub fn alice_id() -> Uuid {
    Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
}

pub fn business_id() -> Uuid {
    Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap()
}

pub fn review_id() -> Uuid {
    Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap()
}

pub fn session_id() -> Uuid {
    Uuid::parse_str("44444444-4444-4444-4444-444444444444").unwrap()
}

fn timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
}

pub fn alice(password_hash: &str) -> user_model::Model {
    user_model::Model {
        id: alice_id(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: password_hash.to_string(),
        full_name: "Alice Example".to_string(),
        role: "user".to_string(),
        avatar: None,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn cafe() -> business_model::Model {
    business_model::Model {
        id: business_id(),
        owner_id: alice_id(),
        name: "Blue Bottle Cafe".to_string(),
        description: Some("Specialty coffee".to_string()),
        category: "cafe".to_string(),
        address: "1 Coffee Street".to_string(),
        phone: Some("+1-555-0100".to_string()),
        photos: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn review(id: Uuid, rating: i16) -> review_model::Model {
    review_model::Model {
        id,
        business_id: business_id(),
        user_id: alice_id(),
        rating,
        comment: Some("Great coffee".to_string()),
        photos: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn session(token_hash: &str) -> session_model::Model {
    session_model::Model {
        id: session_id(),
        user_id: alice_id(),
        token_hash: token_hash.to_string(),
        user_agent: Some("integration-test".to_string()),
        ip_address: None,
        expires_at: timestamp() + chrono::Duration::hours(1),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}
