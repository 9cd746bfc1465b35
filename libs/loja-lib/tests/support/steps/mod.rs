pub mod given;
pub mod then_catalog;
pub mod then_user;
pub mod when_catalog;
pub mod when_user;
