use axum::Json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::ProductResponse;
use crate::methods::routes::PRODUCTS_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = PRODUCTS_BY_ID_PATH,
    tag = "produtos",
    params(
        ("id" = String, Path, description = "Product ID (UUID)")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_product_by_id(
    _caller: AuthUser,
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<ProductResponse>, ApiError> {
    let parsed_id = Uuid::parse_str(&id).map_err(|_| ApiError::invalid_uuid())?;

    match state.products.get_product(parsed_id).await {
        Ok(Some(product)) => Ok(Json(ProductResponse::from(product))),
        Ok(None) => Err(ApiError::product_not_found()),
        Err(e) => Err(handle_service_error(e, &state.env, "get_product_by_id")),
    }
}
