use cucumber::then;

use loja_lib::errors_service::CatalogServiceError;

use crate::support::world::CatalogWorld;

#[then("the registration succeeds")]
pub async fn registration_succeeds(world: &mut CatalogWorld) {
    let user = world.user();
    assert_eq!(Some(user.id), world.current_user_id);
}

#[then("the update succeeds")]
pub async fn update_succeeds(world: &mut CatalogWorld) {
    let result = world.user_result.as_ref().expect("a user operation ran");
    assert!(result.is_ok(), "update failed: {result:?}");
}

#[then(expr = "the user has name {string} and email {string}")]
pub async fn user_has(world: &mut CatalogWorld, name: String, email: String) {
    let user = world.user();
    assert_eq!(user.name, name);
    assert_eq!(user.email, email);
}

#[then("the user keeps the same id")]
pub async fn user_keeps_id(world: &mut CatalogWorld) {
    assert_eq!(Some(world.user().id), world.current_user_id);
}

#[then("the operation is rejected as invalid")]
pub async fn rejected_as_invalid(world: &mut CatalogWorld) {
    let err = world.user_error();
    assert!(err.is_validation(), "expected a validation error, got {err:?}");
}

#[then("the operation reports not found")]
pub async fn reports_not_found(world: &mut CatalogWorld) {
    assert!(matches!(world.user_error(), CatalogServiceError::NotFound));
}

#[then(expr = "I receive {int} users")]
pub async fn receive_users(world: &mut CatalogWorld, count: usize) {
    let users = world
        .users_result
        .as_ref()
        .expect("users were listed")
        .as_ref()
        .expect("listing succeeded");
    assert_eq!(users.len(), count);
}

#[then(expr = "the login succeeds for {string}")]
pub async fn login_succeeds(world: &mut CatalogWorld, email: String) {
    let session = world
        .session_result
        .as_ref()
        .expect("a login was attempted")
        .as_ref()
        .expect("login succeeded");
    assert_eq!(session.user.email, email);
    assert!(session.token.starts_with("Bearer "));
}

#[then("the issued token identifies that user")]
pub async fn token_identifies_user(world: &mut CatalogWorld) {
    let session = world
        .session_result
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("login succeeded");
    let claims = world.users.verify_token(&session.token).expect("token is valid");
    let expected = world.current_user_id.expect("a user is registered");
    assert_eq!(claims.sub, expected.to_string());
}

#[then("the login is rejected")]
pub async fn login_rejected(world: &mut CatalogWorld) {
    let result = world.session_result.as_ref().expect("a login was attempted");
    assert!(matches!(result, Err(CatalogServiceError::InvalidCredentials)));
}
