use std::sync::Arc;
use std::time::Duration;

use chrono::{Months, NaiveDate};
use cucumber::World;
use secrecy::SecretString;
use uuid::Uuid;

use loja_lib::auth::TokenConfig;
use loja_lib::category_service::CategoryService;
use loja_lib::entities::{Category, Product, Session, User, UserDraft};
use loja_lib::errors_service::CatalogServiceError;
use loja_lib::product_service::ProductService;
use loja_lib::repository::MemoryRepository;
use loja_lib::user_service::UserService;

pub const ROOT_EMAIL: &str = "root@root.com";
pub const ROOT_PASSWORD: &str = "rootroot";

#[derive(World)]
#[world(init = Self::new)]
pub struct CatalogWorld {
    pub users: UserService<MemoryRepository>,
    pub categories: CategoryService<MemoryRepository, MemoryRepository>,
    pub products: ProductService<MemoryRepository>,

    // State
    pub current_user_id: Option<Uuid>,
    pub current_category_id: Option<Uuid>,
    pub current_product_id: Option<Uuid>,

    // Results
    pub user_result: Option<Result<User, CatalogServiceError>>,
    pub users_result: Option<Result<Vec<User>, CatalogServiceError>>,
    pub session_result: Option<Result<Session, CatalogServiceError>>,
    pub category_result: Option<Result<Category, CatalogServiceError>>,
    pub categories_result: Option<Result<Vec<Category>, CatalogServiceError>>,
    pub product_result: Option<Result<Product, CatalogServiceError>>,
    pub products_result: Option<Result<Vec<Product>, CatalogServiceError>>,
    pub delete_result: Option<Result<(), CatalogServiceError>>,
}

impl std::fmt::Debug for CatalogWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorld")
            .field("current_user_id", &self.current_user_id)
            .field("current_category_id", &self.current_category_id)
            .field("current_product_id", &self.current_product_id)
            .field("user_result", &self.user_result)
            .field("category_result", &self.category_result)
            .field("product_result", &self.product_result)
            .field("delete_result", &self.delete_result)
            .finish_non_exhaustive()
    }
}

impl CatalogWorld {
    pub fn new() -> Self {
        let repo = MemoryRepository::new_shared();
        let tokens = TokenConfig::new(
            SecretString::new("bdd-secret".to_string()),
            Duration::from_secs(3600),
        );
        Self {
            users: UserService::with_repos(Arc::clone(&repo), Arc::new(tokens)),
            categories: CategoryService::with_repos(Arc::clone(&repo), Arc::clone(&repo)),
            products: ProductService::with_repos(repo),
            current_user_id: None,
            current_category_id: None,
            current_product_id: None,
            user_result: None,
            users_result: None,
            session_result: None,
            category_result: None,
            categories_result: None,
            product_result: None,
            products_result: None,
            delete_result: None,
        }
    }

    pub fn today() -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    /// Birth date of someone who turns `years` old today.
    pub fn born_years_ago(years: u32) -> NaiveDate {
        Self::today()
            .checked_sub_months(Months::new(years * 12))
            .expect("birth date in range")
    }

    pub fn draft(name: &str, email: &str, password: &str, birth_date: NaiveDate) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::new(password.to_string()),
            photo: Some(String::new()),
            birth_date,
        }
    }

    pub fn user(&self) -> &User {
        self.user_result
            .as_ref()
            .expect("a user operation ran")
            .as_ref()
            .expect("the user operation succeeded")
    }

    pub fn user_error(&self) -> &CatalogServiceError {
        self.user_result
            .as_ref()
            .expect("a user operation ran")
            .as_ref()
            .expect_err("the user operation failed")
    }

    pub fn category(&self) -> &Category {
        self.category_result
            .as_ref()
            .expect("a category operation ran")
            .as_ref()
            .expect("the category operation succeeded")
    }

    pub fn product(&self) -> &Product {
        self.product_result
            .as_ref()
            .expect("a product operation ran")
            .as_ref()
            .expect("the product operation succeeded")
    }
}
