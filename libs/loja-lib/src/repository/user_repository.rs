use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};
use uuid::Uuid;
use crate::repository::models::{UserRecord, UserRow};
use crate::repository::errors::CatalogRepositoryError;
use crate::repository::traits::UserRepositoryTrait;

const USER_COLUMNS: &str = "id, name, email, password_hash, photo, birth_date";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, user_id: &str) -> Result<Option<UserRow>, CatalogRepositoryError> {
        let user = query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CatalogRepositoryError::from)?;

        Ok(user)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError> {
        let user_id = Uuid::new_v4().to_string();

        query(
            r#"
            INSERT INTO users (id, name, email, password_hash, photo, birth_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.photo)
        .bind(user.birth_date)
        .execute(&self.pool)
        .await
        .map_err(CatalogRepositoryError::from)?;

        self.fetch_user(&user_id)
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_user(&self, user_id: Uuid, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError> {
        query(
            r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, photo = ?, birth_date = ?
            WHERE id = ?
            "#
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.photo)
        .bind(user.birth_date)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(CatalogRepositoryError::from)?;

        // MySQL reports zero affected rows when nothing changed, so re-read instead.
        self.fetch_user(&user_id.to_string())
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<UserRow>, CatalogRepositoryError> {
        self.fetch_user(&user_id.to_string()).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, CatalogRepositoryError> {
        let user = query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(CatalogRepositoryError::from)?;

        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<UserRow>, CatalogRepositoryError> {
        let users = query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(CatalogRepositoryError::from)?;

        Ok(users)
    }
}
