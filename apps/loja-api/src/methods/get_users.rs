use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::UserResponse;
use crate::methods::routes::USERS_ALL_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_ALL_PATH,
    tag = "usuarios",
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every registered user", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_users(
    _caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    state
        .users
        .get_users()
        .await
        .map(|users| Json(users.into_iter().map(UserResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_users"))
}
