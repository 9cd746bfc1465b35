use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::CategoryResponse;
use crate::methods::routes::CATEGORIES_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = CATEGORIES_PATH,
    tag = "categorias",
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every category with its products", body = Vec<CategoryResponse>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_categories(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    state
        .categories
        .get_categories()
        .await
        .map(|categories| Json(categories.into_iter().map(CategoryResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_categories"))
}
