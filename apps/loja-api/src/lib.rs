//! HTTP facade of the Loja Games catalog.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod methods;
pub mod router;
pub mod shutdown;
pub mod state;

pub use router::{app_router, with_middleware, ApiDoc};
pub use state::AppState;
