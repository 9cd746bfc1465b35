use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::ProductResponse;
use crate::methods::routes::PRODUCTS_BY_NAME_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = PRODUCTS_BY_NAME_PATH,
    tag = "produtos",
    params(
        ("nome" = String, Path, description = "Case-insensitive fragment of the product name")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_products_by_name(
    _caller: AuthUser,
    axum::extract::Path(name): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    state
        .products
        .get_products_by_name(&name)
        .await
        .map(|products| Json(products.into_iter().map(ProductResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_products_by_name"))
}
