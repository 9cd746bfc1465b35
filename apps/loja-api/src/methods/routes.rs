// User routes
pub const USERS_REGISTER_PATH: &str = "/usuarios/cadastrar";
pub const USERS_LOGIN_PATH: &str = "/usuarios/logar";
pub const USERS_UPDATE_PATH: &str = "/usuarios/atualizar";
pub const USERS_ALL_PATH: &str = "/usuarios/all";
pub const USERS_BY_ID_PATH: &str = "/usuarios/{id}";

// Category routes
pub const CATEGORIES_PATH: &str = "/categorias";
pub const CATEGORIES_BY_ID_PATH: &str = "/categorias/{id}";
pub const CATEGORIES_BY_KIND_PATH: &str = "/categorias/tipo/{tipo}";

// Product routes
pub const PRODUCTS_PATH: &str = "/produtos";
pub const PRODUCTS_BY_ID_PATH: &str = "/produtos/{id}";
pub const PRODUCTS_BY_NAME_PATH: &str = "/produtos/nome/{nome}";

// Service routes
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";
