use axum::http::StatusCode;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::routes::CATEGORIES_BY_ID_PATH;
use crate::state::AppState;

/// Deletes the category together with all of its products.
#[utoipa::path(
    delete,
    path = CATEGORIES_BY_ID_PATH,
    tag = "categorias",
    params(
        ("id" = String, Path, description = "Category ID (UUID)")
    ),
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_category(
    caller: AuthUser,
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<StatusCode, ApiError> {
    let parsed_id = Uuid::parse_str(&id).map_err(|_| ApiError::invalid_uuid())?;

    state
        .categories
        .delete_category(parsed_id)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "delete_category"))?;

    tracing::info!(caller = %caller.user_id, category_id = %parsed_id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}
