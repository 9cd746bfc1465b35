use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{CategoryRequest, CategoryResponse};
use crate::methods::routes::CATEGORIES_PATH;
use crate::state::AppState;

#[utoipa::path(
    put,
    path = CATEGORIES_PATH,
    tag = "categorias",
    request_body = CategoryRequest,
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Missing id or validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_category(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let (category_id, kind) = payload.into_update()?;

    state
        .categories
        .update_category(category_id, &kind)
        .await
        .map(|category| Json(CategoryResponse::from(category)))
        .map_err(|e| handle_service_error(e, &state.env, "update_category"))
}
