use axum::http::StatusCode;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::routes::PRODUCTS_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    delete,
    path = PRODUCTS_BY_ID_PATH,
    tag = "produtos",
    params(
        ("id" = String, Path, description = "Product ID (UUID)")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_product(
    _caller: AuthUser,
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<StatusCode, ApiError> {
    let parsed_id = Uuid::parse_str(&id).map_err(|_| ApiError::invalid_uuid())?;

    state
        .products
        .delete_product(parsed_id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "delete_product"))?;

    Ok(StatusCode::NO_CONTENT)
}
