use crate::entities::{CategorySummary, Product, ProductDraft};
use crate::errors_service::CatalogServiceError;
use crate::repository::models::{ProductRecord, ProductRow};
use crate::repository::traits::ProductRepositoryTrait;
use crate::repository::ProductRepository;
use crate::user_service::parse_uuid;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 255;

/// Upper bound (exclusive) of a `DECIMAL(12,2)` column.
fn max_price() -> Decimal {
    Decimal::new(10_000_000_000, 0)
}

fn product_record(draft: ProductDraft) -> Result<ProductRecord, CatalogServiceError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CatalogServiceError::Validation(
            "product name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CatalogServiceError::Validation(format!(
            "product name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    if draft.price < Decimal::ZERO {
        return Err(CatalogServiceError::Validation(
            "price cannot be negative".to_string(),
        ));
    }
    let price = draft
        .price
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if price >= max_price() {
        return Err(CatalogServiceError::Validation("price is too large".to_string()));
    }

    Ok(ProductRecord {
        name: name.to_string(),
        price,
        photo: draft.photo,
        category_id: draft.category_id,
    })
}

fn product_from_row(row: ProductRow) -> Result<Product, CatalogServiceError> {
    Ok(Product {
        id: parse_uuid(&row.id)?,
        name: row.name,
        price: row.price,
        photo: row.photo,
        category: CategorySummary {
            id: parse_uuid(&row.category_id)?,
            kind: row.category_kind,
        },
    })
}

fn products_from_rows(rows: Vec<ProductRow>) -> Result<Vec<Product>, CatalogServiceError> {
    rows.into_iter().map(product_from_row).collect()
}

pub struct ProductService<P: ?Sized = ProductRepository>
where
    P: ProductRepositoryTrait,
{
    pub product_repo: Arc<P>,
}

impl<P: ProductRepositoryTrait + ?Sized> Clone for ProductService<P> {
    fn clone(&self) -> Self {
        Self {
            product_repo: Arc::clone(&self.product_repo),
        }
    }
}

impl ProductService<ProductRepository> {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self {
            product_repo: Arc::new(product_repo),
        }
    }
}

impl<P> ProductService<P>
where
    P: ProductRepositoryTrait + ?Sized,
{
    pub fn with_repos(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    /// Fails with [`CatalogServiceError::CategoryNotFound`] when the category does not exist.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogServiceError> {
        let record = product_record(draft)?;
        let row = self.product_repo.create_product(&record).await?;
        let product = product_from_row(row)?;
        tracing::info!(product_id = %product.id, category_id = %product.category.id, "Product created");
        Ok(product)
    }

    pub async fn update_product(&self, product_id: Uuid, draft: ProductDraft) -> Result<Product, CatalogServiceError> {
        let record = product_record(draft)?;
        let row = self.product_repo.update_product(product_id, &record).await?;
        product_from_row(row)
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<Option<Product>, CatalogServiceError> {
        self.product_repo
            .get_product(product_id)
            .await?
            .map(product_from_row)
            .transpose()
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        products_from_rows(self.product_repo.get_products().await?)
    }

    /// Products whose name contains `needle`, ignoring case.
    pub async fn get_products_by_name(&self, needle: &str) -> Result<Vec<Product>, CatalogServiceError> {
        products_from_rows(self.product_repo.get_products_by_name(needle).await?)
    }

    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), CatalogServiceError> {
        self.product_repo.delete_product(product_id).await?;
        tracing::info!(product_id = %product_id, "Product deleted");
        Ok(())
    }
}
