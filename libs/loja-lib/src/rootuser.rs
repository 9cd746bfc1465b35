//! Root user initialization
//!
//! Creates the first account so that the protected endpoints can be reached
//! on a fresh database. Safe to call on every start: an existing account with
//! the configured email is left untouched.

use crate::entities::{User, UserDraft};
use crate::errors_service::CatalogServiceError;
use crate::repository::traits::UserRepositoryTrait;
use crate::user_service::{normalize_email, UserService};
use chrono::NaiveDate;
use secrecy::SecretString;

pub const ROOT_USER_EMAIL: &str = "ROOT_USER_EMAIL";
pub const ROOT_USER_PASSWORD: &str = "ROOT_USER_PASSWORD";
pub const ROOT_USER_NAME: &str = "ROOT_USER_NAME";
pub const ROOT_USER_BIRTH_DATE: &str = "ROOT_USER_BIRTH_DATE";

/// Configuration for root user initialization
#[derive(Debug, Clone)]
pub struct RootUserConfig {
    pub email: String,
    pub name: String,
    pub birth_date: NaiveDate,
}

impl RootUserConfig {
    /// Load root user configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let email = lookup(ROOT_USER_EMAIL)
            .ok_or_else(|| format!("{ROOT_USER_EMAIL} environment variable not set"))?;
        if email.trim().is_empty() {
            return Err(format!("{ROOT_USER_EMAIL} cannot be empty"));
        }

        let name = lookup(ROOT_USER_NAME).unwrap_or_else(|| "Root".to_string());

        let birth_date = match lookup(ROOT_USER_BIRTH_DATE) {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|e| format!("{ROOT_USER_BIRTH_DATE} is not a YYYY-MM-DD date: {e}"))?,
            None => NaiveDate::from_ymd_opt(2000, 1, 1)
                .ok_or_else(|| "invalid default birth date".to_string())?,
        };

        Ok(Self {
            email: email.trim().to_string(),
            name,
            birth_date,
        })
    }

    /// Get the root user password from environment
    pub fn password_from_env() -> Result<SecretString, String> {
        Self::password_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn password_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SecretString, String> {
        let password = lookup(ROOT_USER_PASSWORD)
            .ok_or_else(|| format!("{ROOT_USER_PASSWORD} environment variable not set"))?;
        if password.is_empty() {
            return Err(format!("{ROOT_USER_PASSWORD} cannot be empty"));
        }
        Ok(SecretString::new(password))
    }
}

/// Registers the root user unless an account with its email already exists.
pub async fn initialize_root_user<U>(
    users: &UserService<U>,
    config: &RootUserConfig,
    password: SecretString,
) -> Result<User, CatalogServiceError>
where
    U: UserRepositoryTrait + ?Sized,
{
    if let Some(existing) = users
        .user_repo
        .get_user_by_email(&normalize_email(&config.email))
        .await? {
        tracing::info!(user_id = %existing.id, "Root user already exists in database");
        let user_id = crate::user_service::parse_uuid(&existing.id)?;
        return users
            .get_user(user_id)
            .await?
            .ok_or(CatalogServiceError::NotFound);
    }

    tracing::info!(email = %config.email, "Creating root user in database");
    let user = users
        .register(UserDraft {
            name: config.name.clone(),
            email: config.email.clone(),
            password,
            photo: None,
            birth_date: config.birth_date,
        })
        .await?;

    tracing::info!(user_id = %user.id, "Root user initialized successfully");
    Ok(user)
}
