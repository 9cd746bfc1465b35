//! In-memory repositories for tests and local runs.
//!
//! One [`MemoryRepository`] implements all three repository traits so the
//! category/product relationship (foreign key, cascade delete, joined kind)
//! behaves the way the MySQL schema does.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repository::errors::CatalogRepositoryError;
use crate::repository::models::{CategoryRow, ProductRecord, ProductRow, UserRecord, UserRow};
use crate::repository::traits::{
    CategoryRepositoryTrait, ProductRepositoryTrait, UserRepositoryTrait,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    categories: HashMap<Uuid, String>,
    products: HashMap<Uuid, ProductRecord>,
}

impl Tables {
    fn user_row(&self, id: Uuid) -> Option<UserRow> {
        self.users.get(&id).map(|user| UserRow {
            id: id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            photo: user.photo.clone(),
            birth_date: user.birth_date,
        })
    }

    fn category_row(&self, id: Uuid) -> Option<CategoryRow> {
        self.categories.get(&id).map(|kind| CategoryRow {
            id: id.to_string(),
            kind: kind.clone(),
        })
    }

    fn product_row(&self, id: Uuid) -> Option<ProductRow> {
        let product = self.products.get(&id)?;
        let kind = self.categories.get(&product.category_id)?;
        Some(ProductRow {
            id: id.to_string(),
            name: product.name.clone(),
            price: product.price,
            photo: product.photo.clone(),
            category_id: product.category_id.to_string(),
            category_kind: kind.clone(),
        })
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|(id, user)| same_email(&user.email, email) && Some(*id) != except)
    }

    fn products_where(&self, keep: impl Fn(&ProductRecord) -> bool) -> Vec<ProductRow> {
        let mut rows: Vec<ProductRow> = self
            .products
            .iter()
            .filter(|(_, product)| keep(product))
            .filter_map(|(id, _)| self.product_row(*id))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

// MySQL compares `users.email` under a case-insensitive collation.
fn same_email(stored: &str, candidate: &str) -> bool {
    stored.to_lowercase() == candidate.to_lowercase()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryRepository {
    async fn create_user(&self, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(CatalogRepositoryError::EmailAlreadyExists);
        }
        let id = Uuid::new_v4();
        tables.users.insert(id, user.clone());
        tables.user_row(id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_user(&self, user_id: Uuid, user: &UserRecord) -> Result<UserRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(CatalogRepositoryError::NotFound);
        }
        if tables.email_taken(&user.email, Some(user_id)) {
            return Err(CatalogRepositoryError::EmailAlreadyExists);
        }
        tables.users.insert(user_id, user.clone());
        tables.user_row(user_id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<UserRow>, CatalogRepositoryError> {
        Ok(self.tables.read().await.user_row(user_id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, CatalogRepositoryError> {
        let tables = self.tables.read().await;
        let id = tables
            .users
            .iter()
            .find(|(_, user)| same_email(&user.email, email))
            .map(|(id, _)| *id);
        Ok(id.and_then(|id| tables.user_row(id)))
    }

    async fn get_users(&self) -> Result<Vec<UserRow>, CatalogRepositoryError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<UserRow> = tables
            .users
            .keys()
            .filter_map(|id| tables.user_row(*id))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
        Ok(rows)
    }
}

#[async_trait]
impl CategoryRepositoryTrait for MemoryRepository {
    async fn create_category(&self, kind: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        let id = Uuid::new_v4();
        tables.categories.insert(id, kind.to_string());
        tables.category_row(id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_category(&self, category_id: Uuid, kind: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&category_id) {
            Some(existing) => *existing = kind.to_string(),
            None => return Err(CatalogRepositoryError::NotFound),
        }
        tables.category_row(category_id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_category(&self, category_id: Uuid) -> Result<Option<CategoryRow>, CatalogRepositoryError> {
        Ok(self.tables.read().await.category_row(category_id))
    }

    async fn get_categories(&self) -> Result<Vec<CategoryRow>, CatalogRepositoryError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<CategoryRow> = tables
            .categories
            .keys()
            .filter_map(|id| tables.category_row(*id))
            .collect();
        rows.sort_by(|a, b| a.kind.cmp(&b.kind));
        Ok(rows)
    }

    async fn get_categories_by_kind(&self, needle: &str) -> Result<Vec<CategoryRow>, CatalogRepositoryError> {
        let mut rows = self.get_categories().await?;
        rows.retain(|row| contains_ignore_case(&row.kind, needle));
        Ok(rows)
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<(), CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&category_id).is_none() {
            return Err(CatalogRepositoryError::NotFound);
        }
        tables
            .products
            .retain(|_, product| product.category_id != category_id);
        Ok(())
    }
}

#[async_trait]
impl ProductRepositoryTrait for MemoryRepository {
    async fn create_product(&self, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&product.category_id) {
            return Err(CatalogRepositoryError::CategoryNotFound);
        }
        let id = Uuid::new_v4();
        tables.products.insert(id, product.clone());
        tables.product_row(id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn update_product(&self, product_id: Uuid, product: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&product.category_id) {
            return Err(CatalogRepositoryError::CategoryNotFound);
        }
        if !tables.products.contains_key(&product_id) {
            return Err(CatalogRepositoryError::NotFound);
        }
        tables.products.insert(product_id, product.clone());
        tables.product_row(product_id).ok_or(CatalogRepositoryError::NotFound)
    }

    async fn get_product(&self, product_id: Uuid) -> Result<Option<ProductRow>, CatalogRepositoryError> {
        Ok(self.tables.read().await.product_row(product_id))
    }

    async fn get_products(&self) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        Ok(self.tables.read().await.products_where(|_| true))
    }

    async fn get_products_by_name(&self, needle: &str) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .products_where(|product| contains_ignore_case(&product.name, needle)))
    }

    async fn get_products_for_categories(&self, category_ids: &[String]) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        let wanted: Vec<Uuid> = category_ids
            .iter()
            .filter_map(|id| Uuid::parse_str(id).ok())
            .collect();
        Ok(self
            .tables
            .read()
            .await
            .products_where(|product| wanted.contains(&product.category_id)))
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), CatalogRepositoryError> {
        match self.tables.write().await.products.remove(&product_id) {
            Some(_) => Ok(()),
            None => Err(CatalogRepositoryError::NotFound),
        }
    }
}
