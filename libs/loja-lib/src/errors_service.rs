use crate::repository::errors::CatalogRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("user must be at least 18 years old")]
    Underage,

    #[error("category does not exist")]
    CategoryNotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("resource not found")]
    NotFound,

    #[error("invalid UUID in database: {0}")]
    InvalidUuid(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CatalogServiceError {
    /// Errors the caller can fix by changing the request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogServiceError::EmailAlreadyExists
                | CatalogServiceError::Underage
                | CatalogServiceError::CategoryNotFound
                | CatalogServiceError::Validation(_)
        )
    }

    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            CatalogServiceError::InvalidCredentials | CatalogServiceError::InvalidToken
        )
    }
}

impl From<CatalogRepositoryError> for CatalogServiceError {
    fn from(err: CatalogRepositoryError) -> Self {
        match err {
            CatalogRepositoryError::EmailAlreadyExists => CatalogServiceError::EmailAlreadyExists,
            CatalogRepositoryError::CategoryNotFound => CatalogServiceError::CategoryNotFound,
            CatalogRepositoryError::NotFound => CatalogServiceError::NotFound,
            CatalogRepositoryError::Sqlx(e) => CatalogServiceError::Internal(e.into()),
        }
    }
}
