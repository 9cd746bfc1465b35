use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};
use uuid::Uuid;

use crate::repository::contains_pattern;
use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::CategoryRow;
use crate::repository::traits::CategoryRepositoryTrait;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pub pool: MySqlPool,
}

impl CategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_category(&self, category_id: &str) -> Result<Option<CategoryRow>, CatalogRepositoryError> {
        let category = query_as::<_, CategoryRow>(
            r#"SELECT id, kind FROM categories WHERE id = ? "#
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(category)
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create_category(&self, kind: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        let id = Uuid::new_v4().to_string();
        query(
            r#"
            INSERT INTO categories (id, kind)
            VALUES (?, ?)
            "#
        )
        .bind(&id)
        .bind(kind)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_category(&id)
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_category(&self, category_id: Uuid, kind: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        query(
            r#"
            UPDATE categories
            SET kind = ?
            WHERE id = ?
            "#
        )
        .bind(kind)
        .bind(category_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_category(&category_id.to_string())
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_category(&self, category_id: Uuid) -> Result<Option<CategoryRow>, CatalogRepositoryError> {
        self.fetch_category(&category_id.to_string()).await
    }

    async fn get_categories(&self) -> Result<Vec<CategoryRow>, CatalogRepositoryError> {
        let categories = query_as::<_, CategoryRow>(
            r#"
            SELECT id, kind FROM categories ORDER BY kind
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(categories)
    }

    async fn get_categories_by_kind(&self, needle: &str) -> Result<Vec<CategoryRow>, CatalogRepositoryError> {
        let categories = query_as::<_, CategoryRow>(
            r#"
            SELECT id, kind FROM categories
            WHERE LOWER(kind) LIKE ?
            ORDER BY kind
            "#
        )
        .bind(contains_pattern(needle))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(categories)
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<(), CatalogRepositoryError> {
        // products go with it through ON DELETE CASCADE
        let result = query(
            r#"
            DELETE FROM categories WHERE id = ?
            "#
        )
        .bind(category_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogRepositoryError::NotFound);
        }
        Ok(())
    }
}
