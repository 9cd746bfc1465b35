use std::str::FromStr;

use chrono::NaiveDate;
use cucumber::given;
use rust_decimal::Decimal;

use loja_lib::entities::ProductDraft;

use crate::support::world::{CatalogWorld, ROOT_EMAIL, ROOT_PASSWORD};

#[given("the root user is registered")]
pub async fn root_user_registered(world: &mut CatalogWorld) {
    let birth_date = NaiveDate::from_ymd_opt(2000, 10, 9).unwrap();
    world
        .users
        .register(CatalogWorld::draft("Root", ROOT_EMAIL, ROOT_PASSWORD, birth_date))
        .await
        .expect("root user registered");
}

#[given(expr = "{string} is registered with email {string} and password {string}")]
pub async fn user_registered(world: &mut CatalogWorld, name: String, email: String, password: String) {
    let birth_date = NaiveDate::from_ymd_opt(2000, 7, 13).unwrap();
    let user = world
        .users
        .register(CatalogWorld::draft(&name, &email, &password, birth_date))
        .await
        .expect("user registered");
    world.current_user_id = Some(user.id);
}

#[given(expr = "the category {string} exists")]
pub async fn category_exists(world: &mut CatalogWorld, kind: String) {
    let category = world
        .categories
        .create_category(&kind)
        .await
        .expect("category created");
    world.current_category_id = Some(category.id);
}

#[given(expr = "the product {string} priced {word} exists in that category")]
pub async fn product_exists(world: &mut CatalogWorld, name: String, price: String) {
    let category_id = world.current_category_id.expect("a category exists");
    let product = world
        .products
        .create_product(ProductDraft {
            name,
            price: Decimal::from_str(&price).expect("price is a decimal"),
            photo: Some(String::new()),
            category_id,
        })
        .await
        .expect("product created");
    world.current_product_id = Some(product.id);
}
