// src/utils/jwt.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user_model::UserClaims;

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid JWT token")]
    InvalidToken,

    #[error("Missing JWT secret key")]
    MissingSecretKey,

    #[error("Invalid JWT configuration: {0}")]
    ConfigurationError(String),
}

/// アクセストークンのClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// JWT ID
    pub jti: String,
    /// User information
    pub user: UserClaims,
}

/// JWT設定
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    /// アクセストークンの有効期限（分）
    pub access_token_expiry_minutes: i64,
    pub issuer: String,
}

impl JwtConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, JwtError> {
        let secret_key = env::var("JWT_SECRET_KEY").map_err(|_| JwtError::MissingSecretKey)?;

        let access_token_expiry_minutes = env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| JwtError::ConfigurationError("Invalid access token expiry".to_string()))?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "review-backend".to_string());

        Ok(Self {
            secret_key,
            access_token_expiry_minutes,
            issuer,
        })
    }

    pub fn validate(&self) -> Result<(), JwtError> {
        if self.secret_key.len() < 32 {
            return Err(JwtError::ConfigurationError(
                "JWT secret key must be at least 32 characters".to_string(),
            ));
        }

        if self.access_token_expiry_minutes <= 0 {
            return Err(JwtError::ConfigurationError(
                "Access token expiry must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// アクセストークンの発行と検証
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn create_access_token(&self, user: UserClaims) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.access_token_expiry_minutes);

        let claims = AccessTokenClaims {
            sub: user.user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
            user,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| JwtError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// トークンの有効期限（分）。セッションの expires_at に使う。
    pub fn access_token_expiry_minutes(&self) -> i64 {
        self.config.access_token_expiry_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret_key: "test-secret-key-that-is-long-enough!".to_string(),
            access_token_expiry_minutes: 60,
            issuer: "review-backend-test".to_string(),
        }
    }

    fn test_claims() -> UserClaims {
        UserClaims {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let manager = JwtManager::new(test_config()).unwrap();
        let claims = test_claims();

        let token = manager.create_access_token(claims.clone()).unwrap();
        let decoded = manager.verify_access_token(&token).unwrap();

        assert_eq!(decoded.user, claims);
        assert_eq!(decoded.sub, claims.user_id.to_string());
        assert_eq!(decoded.iss, "review-backend-test");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = test_config();
        // デフォルトのleeway(60秒)を確実に超えた過去にする
        config.access_token_expiry_minutes = 60;
        let manager = JwtManager::new(config).unwrap();

        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::minutes(120)).timestamp(),
            exp: (now - Duration::minutes(60)).timestamp(),
            iss: "review-backend-test".to_string(),
            jti: Uuid::new_v4().to_string(),
            user: test_claims(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-that-is-long-enough!".as_bytes()),
        )
        .unwrap();

        assert!(manager.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let manager = JwtManager::new(test_config()).unwrap();
        let token = manager.create_access_token(test_claims()).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');

        assert!(manager.verify_access_token(&tampered).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let manager = JwtManager::new(test_config()).unwrap();

        let mut other_config = test_config();
        other_config.issuer = "someone-else".to_string();
        let other_manager = JwtManager::new(other_config).unwrap();

        let token = other_manager.create_access_token(test_claims()).unwrap();
        assert!(manager.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let config = JwtConfig {
            secret_key: "short".to_string(),
            access_token_expiry_minutes: 60,
            issuer: "review-backend-test".to_string(),
        };

        assert!(JwtManager::new(config).is_err());
    }
}
