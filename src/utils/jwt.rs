use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, UserRole};
use crate::utils::errors::AppError;

fn sign(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    expiry_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + expiry_seconds as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Short-lived token used on every authenticated request.
pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    sign(
        user_id,
        role,
        &jwt_config.access_secret,
        jwt_config.access_token_expiry,
    )
}

/// Long-lived token accepted only by the refresh endpoint. Signed with a
/// separate secret so a leaked access secret cannot mint refresh tokens.
pub fn create_refresh_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    sign(
        user_id,
        role,
        &jwt_config.refresh_secret,
        jwt_config.refresh_token_expiry,
    )
}

pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify(token, &jwt_config.access_secret)
        .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))
}

pub fn verify_refresh_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify(token, &jwt_config.refresh_secret)
        .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid refresh token")))
}
