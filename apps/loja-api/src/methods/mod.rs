pub mod entities;
pub mod routes;

pub mod health_check;

pub mod get_user_by_id;
pub mod get_users;
pub mod login;
pub mod register_user;
pub mod update_user;

pub mod create_category;
pub mod delete_category;
pub mod get_categories;
pub mod get_categories_by_kind;
pub mod get_category_by_id;
pub mod update_category;

pub mod create_product;
pub mod delete_product;
pub mod get_product_by_id;
pub mod get_products;
pub mod get_products_by_name;
pub mod update_product;
