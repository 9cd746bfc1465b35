use axum::{http::StatusCode, Json};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{CategoryRequest, CategoryResponse};
use crate::methods::routes::CATEGORIES_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = CATEGORIES_PATH,
    tag = "categorias",
    request_body = CategoryRequest,
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_category(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .categories
        .create_category(&payload.kind)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_category"))?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}
