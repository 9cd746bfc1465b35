use cucumber::then;

use loja_lib::errors_service::CatalogServiceError;

use crate::support::world::CatalogWorld;

#[then(expr = "the category operation succeeds with type {string}")]
pub async fn category_succeeds(world: &mut CatalogWorld, kind: String) {
    assert_eq!(world.category().kind, kind);
}

#[then("the category keeps the same id")]
pub async fn category_keeps_id(world: &mut CatalogWorld) {
    assert_eq!(Some(world.category().id), world.current_category_id);
}

#[then("the category operation is rejected as invalid")]
pub async fn category_rejected(world: &mut CatalogWorld) {
    let result = world.category_result.as_ref().expect("a category operation ran");
    assert!(matches!(result, Err(CatalogServiceError::Validation(_))));
}

#[then(expr = "I receive {int} categories")]
pub async fn receive_categories(world: &mut CatalogWorld, count: usize) {
    let categories = world
        .categories_result
        .as_ref()
        .expect("categories were listed")
        .as_ref()
        .expect("listing succeeded");
    assert_eq!(categories.len(), count);
}

#[then(expr = "every category found has a type containing {string}")]
pub async fn categories_match(world: &mut CatalogWorld, needle: String) {
    let categories = world
        .categories_result
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("search succeeded");
    assert!(categories.iter().all(|c| c.kind.contains(&needle)));
}

#[then(expr = "the category found has type {string}")]
pub async fn category_found(world: &mut CatalogWorld, kind: String) {
    assert_eq!(world.category().kind, kind);
}

#[then(expr = "the category found lists {int} products")]
pub async fn category_lists_products(world: &mut CatalogWorld, count: usize) {
    assert_eq!(world.category().products.len(), count);
}

#[then("the deletion succeeds")]
pub async fn deletion_succeeds(world: &mut CatalogWorld) {
    let result = world.delete_result.as_ref().expect("a deletion ran");
    assert!(result.is_ok(), "deletion failed: {result:?}");
}

#[then("the deletion reports not found")]
pub async fn deletion_not_found(world: &mut CatalogWorld) {
    let result = world.delete_result.as_ref().expect("a deletion ran");
    assert!(matches!(result, Err(CatalogServiceError::NotFound)));
}

#[then("looking up that category finds nothing")]
pub async fn category_gone(world: &mut CatalogWorld) {
    let category_id = world.current_category_id.expect("a category exists");
    let found = world.categories.get_category(category_id).await.expect("lookup succeeded");
    assert!(found.is_none());
}

#[then("looking up that product finds nothing")]
pub async fn product_gone(world: &mut CatalogWorld) {
    let product_id = world.current_product_id.expect("a product exists");
    let found = world.products.get_product(product_id).await.expect("lookup succeeded");
    assert!(found.is_none());
}

#[then(expr = "the product operation succeeds with name {string}")]
pub async fn product_succeeds(world: &mut CatalogWorld, name: String) {
    assert_eq!(world.product().name, name);
}

#[then(expr = "the product belongs to the category {string}")]
pub async fn product_category(world: &mut CatalogWorld, kind: String) {
    let product = world.product();
    assert_eq!(product.category.kind, kind);
    assert_eq!(Some(product.category.id), world.current_category_id);
}

#[then("the product keeps the same id")]
pub async fn product_keeps_id(world: &mut CatalogWorld) {
    assert_eq!(Some(world.product().id), world.current_product_id);
}

#[then("the product operation is rejected as invalid")]
pub async fn product_rejected(world: &mut CatalogWorld) {
    let result = world.product_result.as_ref().expect("a product operation ran");
    match result {
        Err(err) => assert!(err.is_validation(), "expected a validation error, got {err:?}"),
        Ok(product) => panic!("expected a validation error, got {product:?}"),
    }
}

#[then(expr = "I receive {int} products")]
pub async fn receive_products(world: &mut CatalogWorld, count: usize) {
    let products = world
        .products_result
        .as_ref()
        .expect("products were listed")
        .as_ref()
        .expect("listing succeeded");
    assert_eq!(products.len(), count);
}

#[then(expr = "every product found has a name containing {string}")]
pub async fn products_match(world: &mut CatalogWorld, needle: String) {
    let products = world
        .products_result
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("search succeeded");
    assert!(products.iter().all(|p| p.name.contains(&needle)));
}
