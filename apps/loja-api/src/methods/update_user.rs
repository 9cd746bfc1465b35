use axum::Json;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{UserRequest, UserResponse};
use crate::methods::routes::USERS_UPDATE_PATH;
use crate::state::AppState;

#[utoipa::path(
    put,
    path = USERS_UPDATE_PATH,
    tag = "usuarios",
    request_body = UserRequest,
    security(("basic_auth" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Missing id, validation error or email taken by another user", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_user(
    caller: AuthUser,
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let (user_id, draft) = payload.into_update()?;
    tracing::debug!(caller = %caller.user_id, user_id = %user_id, "updating user");

    state
        .users
        .update_user(user_id, draft)
        .await
        .map(|user| Json(UserResponse::from(user)))
        .map_err(|e| handle_service_error(e, &state.env, "update_user"))
}
