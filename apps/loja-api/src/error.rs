use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use loja_lib::errors_service::CatalogServiceError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::BASIC_REALM;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn invalid_uuid() -> Self {
        ApiError::BadRequest("invalid uuid".to_string())
    }

    pub fn missing_credentials() -> Self {
        ApiError::Unauthorized("missing credentials".to_string())
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("user not found".to_string())
    }

    pub fn category_not_found() -> Self {
        ApiError::NotFound("category not found".to_string())
    }

    pub fn product_not_found() -> Self {
        ApiError::NotFound("product not found".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", Some(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg)),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", Some(msg))
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", Some(msg)),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            let challenge = format!("Basic realm=\"{BASIC_REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

impl From<CatalogServiceError> for ApiError {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::EmailAlreadyExists => {
                ApiError::BadRequest("email already exists".to_string())
            }
            CatalogServiceError::Underage => {
                ApiError::BadRequest("user must be at least 18 years old".to_string())
            }
            CatalogServiceError::CategoryNotFound => {
                ApiError::BadRequest("category does not exist".to_string())
            }
            CatalogServiceError::Validation(msg) => ApiError::BadRequest(msg),
            CatalogServiceError::InvalidCredentials => {
                ApiError::Unauthorized("invalid email or password".to_string())
            }
            CatalogServiceError::InvalidToken => {
                ApiError::Unauthorized("invalid or expired token".to_string())
            }
            CatalogServiceError::NotFound => ApiError::NotFound("resource not found".to_string()),
            CatalogServiceError::InvalidUuid(msg) => {
                ApiError::Internal(format!("invalid uuid in storage: {}", msg))
            }
            CatalogServiceError::Internal(err) => ApiError::Internal(err.to_string()),
            _ => ApiError::Internal("unexpected error".to_string()),
        }
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: CatalogServiceError, env: &str, operation: &str) -> ApiError {
    match &err {
        CatalogServiceError::Internal(_) | CatalogServiceError::InvalidUuid(_) => {
            tracing::error!(env = %env, error = ?err, operation = %operation, "service error");
            if is_prod_like(env) {
                ApiError::Internal("internal server error".to_string())
            } else {
                ApiError::from(err)
            }
        }
        CatalogServiceError::InvalidCredentials | CatalogServiceError::InvalidToken => {
            tracing::info!(operation = %operation, "authentication rejected");
            ApiError::from(err)
        }
        _ => ApiError::from(err),
    }
}
