use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::CategoryResponse;
use crate::methods::routes::CATEGORIES_BY_KIND_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = CATEGORIES_BY_KIND_PATH,
    tag = "categorias",
    params(
        ("tipo" = String, Path, description = "Case-insensitive fragment of the category type")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching categories", body = Vec<CategoryResponse>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_categories_by_kind(
    _caller: AuthUser,
    axum::extract::Path(kind): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    state
        .categories
        .get_categories_by_kind(&kind)
        .await
        .map(|categories| Json(categories.into_iter().map(CategoryResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_categories_by_kind"))
}
