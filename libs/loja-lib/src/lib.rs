pub mod entities;
pub mod repository;
pub mod util;
pub mod auth;
pub mod user_service;
pub mod category_service;
pub mod product_service;
pub mod errors_service;
pub mod rootuser;

pub use entities::*;
pub use user_service::*;
pub use category_service::*;
pub use product_service::*;
pub use errors_service::*;
pub use rootuser::*;
