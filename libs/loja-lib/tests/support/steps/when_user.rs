use cucumber::when;
use secrecy::SecretString;
use uuid::Uuid;

use crate::support::world::CatalogWorld;

#[when(expr = "I register {string} with email {string} and password {string} aged {int}")]
pub async fn register_user(
    world: &mut CatalogWorld,
    name: String,
    email: String,
    password: String,
    age: u32,
) {
    let draft = CatalogWorld::draft(&name, &email, &password, CatalogWorld::born_years_ago(age));
    let result = world.users.register(draft).await;
    if let Ok(user) = &result {
        world.current_user_id = Some(user.id);
    }
    world.user_result = Some(result);
}

#[when(expr = "I update that user to name {string} and email {string}")]
pub async fn update_user(world: &mut CatalogWorld, name: String, email: String) {
    let user_id = world.current_user_id.expect("a user is registered");
    let draft = CatalogWorld::draft(&name, &email, "nova-senha-123", CatalogWorld::born_years_ago(30));
    world.user_result = Some(world.users.update_user(user_id, draft).await);
}

#[when("I update an unknown user")]
pub async fn update_unknown_user(world: &mut CatalogWorld) {
    let draft = CatalogWorld::draft("Ninguém", "ninguem@email.com", "senha1234", CatalogWorld::born_years_ago(30));
    world.user_result = Some(world.users.update_user(Uuid::new_v4(), draft).await);
}

#[when("I list all users")]
pub async fn list_users(world: &mut CatalogWorld) {
    world.users_result = Some(world.users.get_users().await);
}

#[when("I look up that user by id")]
pub async fn look_up_user(world: &mut CatalogWorld) {
    let user_id = world.current_user_id.expect("a user is registered");
    let result = world
        .users
        .get_user(user_id)
        .await
        .and_then(|found| found.ok_or(loja_lib::CatalogServiceError::NotFound));
    world.user_result = Some(result);
}

#[when(expr = "I log in with email {string} and password {string}")]
pub async fn log_in(world: &mut CatalogWorld, email: String, password: String) {
    let password = SecretString::new(password);
    world.session_result = Some(world.users.authenticate(&email, &password).await);
}
