use crate::entities::{Category, ProductSummary};
use crate::errors_service::CatalogServiceError;
use crate::repository::models::{CategoryRow, ProductRow};
use crate::repository::traits::{CategoryRepositoryTrait, ProductRepositoryTrait};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::user_service::parse_uuid;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const MAX_KIND_LENGTH: usize = 255;

fn validate_kind(kind: &str) -> Result<&str, CatalogServiceError> {
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(CatalogServiceError::Validation(
            "category type cannot be empty".to_string(),
        ));
    }
    if kind.chars().count() > MAX_KIND_LENGTH {
        return Err(CatalogServiceError::Validation(format!(
            "category type cannot exceed {MAX_KIND_LENGTH} characters"
        )));
    }
    Ok(kind)
}

fn product_summary_from_row(row: ProductRow) -> Result<ProductSummary, CatalogServiceError> {
    Ok(ProductSummary {
        id: parse_uuid(&row.id)?,
        name: row.name,
        price: row.price,
        photo: row.photo,
    })
}

fn category_from_row(row: CategoryRow, products: Vec<ProductSummary>) -> Result<Category, CatalogServiceError> {
    Ok(Category {
        id: parse_uuid(&row.id)?,
        kind: row.kind,
        products,
    })
}

pub struct CategoryService<C: ?Sized = CategoryRepository, P: ?Sized = ProductRepository>
where
    C: CategoryRepositoryTrait,
    P: ProductRepositoryTrait,
{
    pub category_repo: Arc<C>,
    pub product_repo: Arc<P>,
}

impl<C, P> Clone for CategoryService<C, P>
where
    C: CategoryRepositoryTrait + ?Sized,
    P: ProductRepositoryTrait + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            category_repo: Arc::clone(&self.category_repo),
            product_repo: Arc::clone(&self.product_repo),
        }
    }
}

impl CategoryService<CategoryRepository, ProductRepository> {
    pub fn new(category_repo: CategoryRepository, product_repo: ProductRepository) -> Self {
        Self {
            category_repo: Arc::new(category_repo),
            product_repo: Arc::new(product_repo),
        }
    }
}

impl<C, P> CategoryService<C, P>
where
    C: CategoryRepositoryTrait + ?Sized,
    P: ProductRepositoryTrait + ?Sized,
{
    pub fn with_repos(category_repo: Arc<C>, product_repo: Arc<P>) -> Self {
        Self {
            category_repo,
            product_repo,
        }
    }

    async fn build_categories_with_products(
        &self,
        category_rows: Vec<CategoryRow>,
    ) -> Result<Vec<Category>, CatalogServiceError> {
        if category_rows.is_empty() {
            return Ok(vec![]);
        }

        let category_ids: Vec<String> = category_rows.iter().map(|r| r.id.clone()).collect();
        let product_rows = self
            .product_repo
            .get_products_for_categories(&category_ids)
            .await?;

        let mut products_by_category: HashMap<String, Vec<ProductSummary>> = HashMap::new();
        for row in product_rows {
            let category_id = row.category_id.clone();
            products_by_category
                .entry(category_id)
                .or_default()
                .push(product_summary_from_row(row)?);
        }

        category_rows
            .into_iter()
            .map(|row| {
                let products = products_by_category.remove(&row.id).unwrap_or_default();
                category_from_row(row, products)
            })
            .collect()
    }

    async fn build_category(&self, row: CategoryRow) -> Result<Category, CatalogServiceError> {
        let mut categories = self.build_categories_with_products(vec![row]).await?;
        categories.pop().ok_or(CatalogServiceError::NotFound)
    }

    pub async fn create_category(&self, kind: &str) -> Result<Category, CatalogServiceError> {
        let kind = validate_kind(kind)?;
        let row = self.category_repo.create_category(kind).await?;
        let category = category_from_row(row, vec![])?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, category_id: Uuid, kind: &str) -> Result<Category, CatalogServiceError> {
        let kind = validate_kind(kind)?;
        let row = self.category_repo.update_category(category_id, kind).await?;
        self.build_category(row).await
    }

    pub async fn get_category(&self, category_id: Uuid) -> Result<Option<Category>, CatalogServiceError> {
        match self.category_repo.get_category(category_id).await? {
            Some(row) => Ok(Some(self.build_category(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let rows = self.category_repo.get_categories().await?;
        self.build_categories_with_products(rows).await
    }

    /// Categories whose type contains `needle`, ignoring case.
    pub async fn get_categories_by_kind(&self, needle: &str) -> Result<Vec<Category>, CatalogServiceError> {
        let rows = self.category_repo.get_categories_by_kind(needle).await?;
        self.build_categories_with_products(rows).await
    }

    /// Deletes the category together with its products.
    pub async fn delete_category(&self, category_id: Uuid) -> Result<(), CatalogServiceError> {
        self.category_repo.delete_category(category_id).await?;
        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(())
    }
}
