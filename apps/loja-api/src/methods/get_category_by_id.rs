use axum::Json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::CategoryResponse;
use crate::methods::routes::CATEGORIES_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = CATEGORIES_BY_ID_PATH,
    tag = "categorias",
    params(
        ("id" = String, Path, description = "Category ID (UUID)")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_category_by_id(
    _caller: AuthUser,
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let parsed_id = Uuid::parse_str(&id).map_err(|_| ApiError::invalid_uuid())?;

    match state.categories.get_category(parsed_id).await {
        Ok(Some(category)) => Ok(Json(CategoryResponse::from(category))),
        Ok(None) => Err(ApiError::category_not_found()),
        Err(e) => Err(handle_service_error(e, &state.env, "get_category_by_id")),
    }
}
