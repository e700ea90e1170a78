use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::{Claims, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_access_token;

/// Extractor that validates the `Authorization: Bearer` access token and
/// exposes the authenticated user's claims.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn role(&self) -> Result<UserRole, AppError> {
        UserRole::parse(&self.0.role)
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid role in token")))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_access_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_role(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_role_parses_known_roles() {
        assert_eq!(
            AuthUser(claims_with_role("STUDENT")).role().unwrap(),
            UserRole::Student
        );
        assert_eq!(
            AuthUser(claims_with_role("FACULTY")).role().unwrap(),
            UserRole::Faculty
        );
        assert_eq!(
            AuthUser(claims_with_role("ADMIN")).role().unwrap(),
            UserRole::Admin
        );
    }

    #[test]
    fn test_role_rejects_unknown_role() {
        assert!(AuthUser(claims_with_role("JANITOR")).role().is_err());
    }

    #[test]
    fn test_user_id_rejects_malformed_sub() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: "STUDENT".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        };
        assert!(AuthUser(claims).user_id().is_err());
    }
}
