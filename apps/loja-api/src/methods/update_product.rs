use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{ProductRequest, ProductResponse};
use crate::methods::routes::PRODUCTS_PATH;
use crate::state::AppState;

#[utoipa::path(
    put,
    path = PRODUCTS_PATH,
    tag = "produtos",
    request_body = ProductRequest,
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Missing id, validation error or unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_product(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let (product_id, draft) = payload.into_update()?;

    state
        .products
        .update_product(product_id, draft)
        .await
        .map(|product| Json(ProductResponse::from(product)))
        .map_err(|e| handle_service_error(e, &state.env, "update_product"))
}
