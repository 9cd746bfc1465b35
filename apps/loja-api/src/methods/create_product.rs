use axum::{http::StatusCode, Json};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{ProductRequest, ProductResponse};
use crate::methods::routes::PRODUCTS_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = PRODUCTS_PATH,
    tag = "produtos",
    request_body = ProductRequest,
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_product(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .products
        .create_product(payload.into_draft())
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_product"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}
