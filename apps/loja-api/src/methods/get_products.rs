use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::ProductResponse;
use crate::methods::routes::PRODUCTS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = PRODUCTS_PATH,
    tag = "produtos",
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every product", body = Vec<ProductResponse>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_products(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    state
        .products
        .get_products()
        .await
        .map(|products| Json(products.into_iter().map(ProductResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_products"))
}
