use std::sync::Arc;

use loja_lib::auth::TokenConfig;
use loja_lib::repository::traits::{
    CategoryRepositoryTrait, ProductRepositoryTrait, UserRepositoryTrait,
};
use loja_lib::repository::{CategoryRepository, MemoryRepository, ProductRepository, UserRepository};
use loja_lib::{CategoryService, ProductService, UserService};
use sqlx::MySqlPool;

pub type DynUserService = UserService<dyn UserRepositoryTrait>;
pub type DynCategoryService = CategoryService<dyn CategoryRepositoryTrait, dyn ProductRepositoryTrait>;
pub type DynProductService = ProductService<dyn ProductRepositoryTrait>;

/// Shared handler state. Services sit behind trait objects so the same
/// router serves the MySQL and the in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<DynUserService>,
    pub categories: Arc<DynCategoryService>,
    pub products: Arc<DynProductService>,
    pub env: String,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        product_repo: Arc<dyn ProductRepositoryTrait>,
        tokens: TokenConfig,
        env: impl Into<String>,
    ) -> Self {
        Self {
            users: Arc::new(UserService::with_repos(user_repo, Arc::new(tokens))),
            categories: Arc::new(CategoryService::with_repos(
                category_repo,
                Arc::clone(&product_repo),
            )),
            products: Arc::new(ProductService::with_repos(product_repo)),
            env: env.into(),
        }
    }

    pub fn mysql(pool: MySqlPool, tokens: TokenConfig, env: impl Into<String>) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(CategoryRepository::new(pool.clone())),
            Arc::new(ProductRepository::new(pool)),
            tokens,
            env,
        )
    }

    pub fn in_memory(tokens: TokenConfig, env: impl Into<String>) -> Self {
        let repo = MemoryRepository::new_shared();
        Self::new(repo.clone(), repo.clone(), repo, tokens, env)
    }
}
