use axum::{http::StatusCode, Json};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{UserRequest, UserResponse};
use crate::methods::routes::USERS_REGISTER_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = USERS_REGISTER_PATH,
    tag = "usuarios",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error, underage user or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn register_user(
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .users
        .register(payload.into_draft())
        .await
        .map_err(|e| handle_service_error(e, &state.env, "register_user"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
