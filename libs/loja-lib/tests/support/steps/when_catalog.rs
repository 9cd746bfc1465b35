use std::str::FromStr;

use cucumber::when;
use rust_decimal::Decimal;
use uuid::Uuid;

use loja_lib::entities::ProductDraft;
use loja_lib::errors_service::CatalogServiceError;

use crate::support::world::CatalogWorld;

fn draft(name: String, price: &str, category_id: Uuid) -> ProductDraft {
    ProductDraft {
        name,
        price: Decimal::from_str(price).expect("price is a decimal"),
        photo: Some(String::new()),
        category_id,
    }
}

#[when(expr = "I create the category {string}")]
pub async fn create_category(world: &mut CatalogWorld, kind: String) {
    world.category_result = Some(world.categories.create_category(&kind).await);
}

#[when(expr = "I rename that category to {string}")]
pub async fn rename_category(world: &mut CatalogWorld, kind: String) {
    let category_id = world.current_category_id.expect("a category exists");
    world.category_result = Some(world.categories.update_category(category_id, &kind).await);
}

#[when("I list all categories")]
pub async fn list_categories(world: &mut CatalogWorld) {
    world.categories_result = Some(world.categories.get_categories().await);
}

#[when("I look up that category by id")]
pub async fn look_up_category(world: &mut CatalogWorld) {
    let category_id = world.current_category_id.expect("a category exists");
    let result = world
        .categories
        .get_category(category_id)
        .await
        .and_then(|found| found.ok_or(CatalogServiceError::NotFound));
    world.category_result = Some(result);
}

#[when(expr = "I search categories whose type contains {string}")]
pub async fn search_categories(world: &mut CatalogWorld, needle: String) {
    world.categories_result = Some(world.categories.get_categories_by_kind(&needle).await);
}

#[when("I delete that category")]
pub async fn delete_category(world: &mut CatalogWorld) {
    let category_id = world.current_category_id.expect("a category exists");
    world.delete_result = Some(world.categories.delete_category(category_id).await);
}

#[when("I delete an unknown category")]
pub async fn delete_unknown_category(world: &mut CatalogWorld) {
    world.delete_result = Some(world.categories.delete_category(Uuid::new_v4()).await);
}

#[when(expr = "I create the product {string} priced {word} in that category")]
pub async fn create_product(world: &mut CatalogWorld, name: String, price: String) {
    let category_id = world.current_category_id.expect("a category exists");
    world.product_result = Some(world.products.create_product(draft(name, &price, category_id)).await);
}

#[when(expr = "I create the product {string} priced {word} in an unknown category")]
pub async fn create_product_unknown_category(world: &mut CatalogWorld, name: String, price: String) {
    world.product_result = Some(
        world
            .products
            .create_product(draft(name, &price, Uuid::new_v4()))
            .await,
    );
}

#[when(expr = "I rename that product to {string}")]
pub async fn rename_product(world: &mut CatalogWorld, name: String) {
    let product_id = world.current_product_id.expect("a product exists");
    let category_id = world.current_category_id.expect("a category exists");
    world.product_result = Some(
        world
            .products
            .update_product(product_id, draft(name, "250.50", category_id))
            .await,
    );
}

#[when("I list all products")]
pub async fn list_products(world: &mut CatalogWorld) {
    world.products_result = Some(world.products.get_products().await);
}

#[when(expr = "I search products whose name contains {string}")]
pub async fn search_products(world: &mut CatalogWorld, needle: String) {
    world.products_result = Some(world.products.get_products_by_name(&needle).await);
}

#[when("I delete that product")]
pub async fn delete_product(world: &mut CatalogWorld) {
    let product_id = world.current_product_id.expect("a product exists");
    world.delete_result = Some(world.products.delete_product(product_id).await);
}
