use async_trait::async_trait;
use uuid::Uuid;

use crate::repository::errors::CatalogRepositoryError;
use crate::repository::models::{CategoryRow, ProductRecord, ProductRow, UserRecord, UserRow};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(&self, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError>;
    async fn update_user(&self, user_id: Uuid, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<UserRow>, CatalogRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, CatalogRepositoryError>;
    async fn get_users(&self) -> Result<Vec<UserRow>, CatalogRepositoryError>;
}

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn create_category(&self, kind: &str) -> Result<CategoryRow, CatalogRepositoryError>;
    async fn update_category(&self, category_id: Uuid, kind: &str) -> Result<CategoryRow, CatalogRepositoryError>;
    async fn get_category(&self, category_id: Uuid) -> Result<Option<CategoryRow>, CatalogRepositoryError>;
    async fn get_categories(&self) -> Result<Vec<CategoryRow>, CatalogRepositoryError>;
    /// Case-insensitive substring match on the category kind.
    async fn get_categories_by_kind(&self, needle: &str) -> Result<Vec<CategoryRow>, CatalogRepositoryError>;
    /// Also removes every product of the category.
    async fn delete_category(&self, category_id: Uuid) -> Result<(), CatalogRepositoryError>;
}

#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    async fn create_product(&self, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError>;
    async fn update_product(&self, product_id: Uuid, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError>;
    async fn get_product(&self, product_id: Uuid) -> Result<Option<ProductRow>, CatalogRepositoryError>;
    async fn get_products(&self) -> Result<Vec<ProductRow>, CatalogRepositoryError>;
    /// Case-insensitive substring match on the product name.
    async fn get_products_by_name(&self, needle: &str) -> Result<Vec<ProductRow>, CatalogRepositoryError>;
    async fn get_products_for_categories(&self, category_ids: &[String]) -> Result<Vec<ProductRow>, CatalogRepositoryError>;
    async fn delete_product(&self, product_id: Uuid) -> Result<(), CatalogRepositoryError>;
}
