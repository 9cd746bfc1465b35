use crate::auth::{hash_password, verify_password, Claims, TokenConfig};
use crate::entities::{Session, User, UserDraft};
use crate::errors_service::CatalogServiceError;
use crate::repository::models::{UserRecord, UserRow};
use crate::repository::traits::UserRepositoryTrait;
use crate::repository::UserRepository;
use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

pub const MINIMUM_AGE: u32 = 18;
pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_FIELD_LENGTH: usize = 255;

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, CatalogServiceError> {
    Uuid::parse_str(s).map_err(|_| CatalogServiceError::InvalidUuid(s.to_string()))
}

/// Whole years between `birth` and `today`, or `None` when `birth` lies in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Emails are stored and looked up in lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn ensure_adult(birth: NaiveDate, today: NaiveDate) -> Result<(), CatalogServiceError> {
    match age_on(birth, today) {
        Some(age) if age >= MINIMUM_AGE => Ok(()),
        _ => Err(CatalogServiceError::Underage),
    }
}

fn validate_draft(draft: &UserDraft) -> Result<(), CatalogServiceError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CatalogServiceError::Validation("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_FIELD_LENGTH {
        return Err(CatalogServiceError::Validation(format!(
            "name cannot exceed {MAX_FIELD_LENGTH} characters"
        )));
    }
    if !draft.email.trim().validate_email() {
        return Err(CatalogServiceError::Validation("email is not valid".to_string()));
    }
    if draft.password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CatalogServiceError::Validation(format!(
            "password must have at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn user_from_row(row: UserRow) -> Result<User, CatalogServiceError> {
    Ok(User {
        id: parse_uuid(&row.id)?,
        name: row.name,
        email: row.email,
        photo: row.photo,
        birth_date: row.birth_date,
    })
}

async fn hash_off_thread(password: SecretString) -> Result<String, CatalogServiceError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(password.expose_secret()))
        .await
        .context("password hashing task failed")??;
    Ok(hash)
}

async fn verify_off_thread(password: SecretString, hash: String) -> Result<bool, CatalogServiceError> {
    let matches = tokio::task::spawn_blocking(move || verify_password(password.expose_secret(), &hash))
        .await
        .context("password verification task failed")??;
    Ok(matches)
}

/// Registration, profile updates and authentication of store users.
pub struct UserService<U: ?Sized = UserRepository>
where
    U: UserRepositoryTrait,
{
    pub user_repo: Arc<U>,
    tokens: Arc<TokenConfig>,
}

impl<U: ?Sized + UserRepositoryTrait> Clone for UserService<U> {
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl UserService<UserRepository> {
    pub fn new(user_repo: UserRepository, tokens: TokenConfig) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            tokens: Arc::new(tokens),
        }
    }
}

impl<U> UserService<U>
where
    U: UserRepositoryTrait + ?Sized,
{
    pub fn with_repos(user_repo: Arc<U>, tokens: Arc<TokenConfig>) -> Self {
        Self { user_repo, tokens }
    }

    async fn to_record(&self, draft: UserDraft) -> Result<UserRecord, CatalogServiceError> {
        let UserDraft {
            name,
            email,
            password,
            photo,
            birth_date,
        } = draft;
        Ok(UserRecord {
            name: name.trim().to_string(),
            email: normalize_email(&email),
            password_hash: hash_off_thread(password).await?,
            photo,
            birth_date,
        })
    }

    /// Registers a new user. The email must be unused and the user an adult.
    pub async fn register(&self, draft: UserDraft) -> Result<User, CatalogServiceError> {
        self.register_on(draft, chrono::Utc::now().date_naive()).await
    }

    /// [`Self::register`] with an explicit reference date for the age rule.
    pub async fn register_on(&self, draft: UserDraft, today: NaiveDate) -> Result<User, CatalogServiceError> {
        validate_draft(&draft)?;
        ensure_adult(draft.birth_date, today)?;

        if self
            .user_repo
            .get_user_by_email(&normalize_email(&draft.email))
            .await?
            .is_some()
        {
            return Err(CatalogServiceError::EmailAlreadyExists);
        }

        let record = self.to_record(draft).await?;
        let row = self.user_repo.create_user(&record).await?;
        let user = user_from_row(row)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Replaces every field of an existing user, password included.
    pub async fn update_user(&self, user_id: Uuid, draft: UserDraft) -> Result<User, CatalogServiceError> {
        self.update_user_on(user_id, draft, chrono::Utc::now().date_naive())
            .await
    }

    pub async fn update_user_on(
        &self,
        user_id: Uuid,
        draft: UserDraft,
        today: NaiveDate,
    ) -> Result<User, CatalogServiceError> {
        if self.user_repo.get_user(user_id).await?.is_none() {
            return Err(CatalogServiceError::NotFound);
        }
        validate_draft(&draft)?;
        ensure_adult(draft.birth_date, today)?;

        if let Some(owner) = self
            .user_repo
            .get_user_by_email(&normalize_email(&draft.email))
            .await?
        {
            if parse_uuid(&owner.id)? != user_id {
                return Err(CatalogServiceError::EmailAlreadyExists);
            }
        }

        let record = self.to_record(draft).await?;
        let row = self.user_repo.update_user(user_id, &record).await?;
        tracing::info!(user_id = %user_id, "User updated");
        user_from_row(row)
    }

    pub async fn get_users(&self) -> Result<Vec<User>, CatalogServiceError> {
        self.user_repo
            .get_users()
            .await?
            .into_iter()
            .map(user_from_row)
            .collect()
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, CatalogServiceError> {
        self.user_repo
            .get_user(user_id)
            .await?
            .map(user_from_row)
            .transpose()
    }

    /// Checks an email/password pair without issuing a token.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<User, CatalogServiceError> {
        let row = self
            .user_repo
            .get_user_by_email(&normalize_email(email))
            .await?
            .ok_or(CatalogServiceError::InvalidCredentials)?;

        let password = SecretString::new(password.expose_secret().clone());
        if !verify_off_thread(password, row.password_hash.clone()).await? {
            return Err(CatalogServiceError::InvalidCredentials);
        }
        user_from_row(row)
    }

    /// Logs a user in, returning the user together with a `Bearer` token.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, CatalogServiceError> {
        let user = match self.verify_credentials(email, password).await {
            Ok(user) => user,
            Err(e) => {
                if e.is_auth() {
                    tracing::warn!(email = %email, "Rejected login attempt");
                }
                return Err(e);
            }
        };
        let token = self.tokens.issue(&user.id.to_string(), &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session { user, token })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, CatalogServiceError> {
        self.tokens
            .validate(token)
            .map_err(|_| CatalogServiceError::InvalidToken)
    }
}
