use axum::Json;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extract::ValidatedJson;
use crate::methods::entities::{LoginRequest, LoginResponse};
use crate::methods::routes::USERS_LOGIN_PATH;
use crate::state::AppState;

/// Exchanges email and password for a `Bearer` token usable on every
/// protected endpoint.
#[utoipa::path(
    post,
    path = USERS_LOGIN_PATH,
    tag = "usuarios",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Wrong email or password", body = ErrorResponse),
    )
)]
pub async fn login(
    axum::extract::State(state): axum::extract::State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .users
        .authenticate(&payload.email, &payload.password)
        .await
        .map(|session| Json(LoginResponse::from(session)))
        .map_err(|e| handle_service_error(e, &state.env, "login"))
}
