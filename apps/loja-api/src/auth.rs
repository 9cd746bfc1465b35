use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::SecretString;
use uuid::Uuid;

use crate::error::{handle_service_error, ApiError};
use crate::state::AppState;

/// Caller identity for protected endpoints.
///
/// Accepts `Authorization: Basic <base64(email:password)>` or the
/// `Authorization: Bearer <token>` returned by the login endpoint.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

enum Credentials {
    Basic { email: String, password: SecretString },
    Bearer(String),
}

fn parse_authorization(value: &str) -> Result<Credentials, ApiError> {
    let (scheme, payload) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ApiError::Unauthorized("invalid authorization header format".to_string()))?;
    let payload = payload.trim();

    if scheme.eq_ignore_ascii_case("basic") {
        let decoded = STANDARD
            .decode(payload)
            .map_err(|_| ApiError::Unauthorized("invalid basic credentials".to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| ApiError::Unauthorized("invalid basic credentials".to_string()))?;
        let (email, password) = decoded
            .split_once(':')
            .ok_or_else(|| ApiError::Unauthorized("invalid basic credentials".to_string()))?;
        Ok(Credentials::Basic {
            email: email.to_string(),
            password: SecretString::new(password.to_string()),
        })
    } else if scheme.eq_ignore_ascii_case("bearer") {
        Ok(Credentials::Bearer(payload.to_string()))
    } else {
        Err(ApiError::Unauthorized(format!(
            "unsupported authorization scheme: {scheme}"
        )))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(ApiError::missing_credentials)?;

        match parse_authorization(header_value)? {
            Credentials::Basic { email, password } => {
                let user = state
                    .users
                    .verify_credentials(&email, &password)
                    .await
                    .map_err(|e| handle_service_error(e, &state.env, "basic_auth"))?;
                Ok(AuthUser {
                    user_id: user.id,
                    email: user.email,
                })
            }
            Credentials::Bearer(token) => {
                let claims = state
                    .users
                    .verify_token(&token)
                    .map_err(|e| handle_service_error(e, &state.env, "bearer_auth"))?;
                let user_id = Uuid::parse_str(&claims.sub)
                    .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;
                Ok(AuthUser {
                    user_id,
                    email: claims.email,
                })
            }
        }
    }
}
