use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::repository::contains_pattern;
use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::{ProductRecord, ProductRow};
use crate::repository::traits::ProductRepositoryTrait;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.price, p.photo, p.category_id, c.kind AS category_kind
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
"#;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pub pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Option<ProductRow>, CatalogRepositoryError> {
        let product = query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE p.id = ?"))
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(product)
    }
}

/// Locks the category row for the rest of the transaction so it cannot vanish
/// between the check and the product write.
async fn lock_category(
    tx: &mut sqlx::Transaction<'_, MySql>,
    category_id: Uuid,
) -> Result<(), CatalogRepositoryError> {
    let found = query_scalar::<_, String>(
        r#"SELECT id FROM categories WHERE id = ? FOR UPDATE"#
    )
    .bind(category_id.to_string())
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_sqlx_error)?;

    match found {
        Some(_) => Ok(()),
        None => Err(CatalogRepositoryError::CategoryNotFound),
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn create_product(&self, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let id = Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        lock_category(&mut tx, product.category_id).await?;

        query(
            r#"
            INSERT INTO products (id, name, price, photo, category_id)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.photo)
        .bind(product.category_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        self.fetch_product(&id)
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_product(&self, product_id: Uuid, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Parent before child, the same order a category delete cascades in.
        lock_category(&mut tx, product.category_id).await?;

        let exists = query_scalar::<_, String>(
            r#"SELECT id FROM products WHERE id = ? FOR UPDATE"#
        )
        .bind(product_id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        if exists.is_none() {
            return Err(CatalogRepositoryError::NotFound);
        }

        query(
            r#"
            UPDATE products
            SET name = ?, price = ?, photo = ?, category_id = ?
            WHERE id = ?
            "#
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.photo)
        .bind(product.category_id.to_string())
        .bind(product_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        self.fetch_product(&product_id.to_string())
            .await?
            .ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_product(&self, product_id: Uuid) -> Result<Option<ProductRow>, CatalogRepositoryError> {
        self.fetch_product(&product_id.to_string()).await
    }

    async fn get_products(&self) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        let products = query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} ORDER BY p.name"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(products)
    }

    async fn get_products_by_name(&self, needle: &str) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        let products = query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} WHERE LOWER(p.name) LIKE ? ORDER BY p.name"
        ))
        .bind(contains_pattern(needle))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(products)
    }

    async fn get_products_for_categories(&self, category_ids: &[String]) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        if category_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(PRODUCT_SELECT);
        builder.push(" WHERE p.category_id IN (");
        let mut ids = builder.separated(", ");
        for id in category_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(") ORDER BY p.name");

        let products = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(products)
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), CatalogRepositoryError> {
        let result = query(
            r#"
            DELETE FROM products WHERE id = ?
            "#
        )
        .bind(product_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogRepositoryError::NotFound);
        }
        Ok(())
    }
}
