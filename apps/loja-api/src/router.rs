use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::MiddlewareConfig;
use crate::error::ErrorResponse;
use crate::methods::create_category::create_category;
use crate::methods::create_product::create_product;
use crate::methods::delete_category::delete_category;
use crate::methods::delete_product::delete_product;
use crate::methods::entities::{
    CategoryRef, CategoryRequest, CategoryResponse, CategorySummaryResponse, LoginRequest,
    LoginResponse, ProductRequest, ProductResponse, ProductSummaryResponse, UserRequest,
    UserResponse,
};
use crate::methods::get_categories::get_categories;
use crate::methods::get_categories_by_kind::get_categories_by_kind;
use crate::methods::get_category_by_id::get_category_by_id;
use crate::methods::get_product_by_id::get_product_by_id;
use crate::methods::get_products::get_products;
use crate::methods::get_products_by_name::get_products_by_name;
use crate::methods::get_user_by_id::get_user_by_id;
use crate::methods::get_users::get_users;
use crate::methods::health_check::health_check;
use crate::methods::login::login;
use crate::methods::register_user::register_user;
use crate::methods::routes::{
    CATEGORIES_BY_ID_PATH, CATEGORIES_BY_KIND_PATH, CATEGORIES_PATH, OPENAPI_JSON_PATH,
    PRODUCTS_BY_ID_PATH, PRODUCTS_BY_NAME_PATH, PRODUCTS_PATH, SERVICE_DOCS_PATH,
    SERVICE_HEALTH_PATH, USERS_ALL_PATH, USERS_BY_ID_PATH, USERS_LOGIN_PATH, USERS_REGISTER_PATH,
    USERS_UPDATE_PATH,
};
use crate::methods::update_category::update_category;
use crate::methods::update_product::update_product;
use crate::methods::update_user::update_user;
use crate::state::AppState;

const X_REQUEST_ID: &str = "x-request-id";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::methods::health_check::health_check,
        crate::methods::register_user::register_user,
        crate::methods::login::login,
        crate::methods::update_user::update_user,
        crate::methods::get_users::get_users,
        crate::methods::get_user_by_id::get_user_by_id,
        crate::methods::create_category::create_category,
        crate::methods::update_category::update_category,
        crate::methods::get_categories::get_categories,
        crate::methods::get_category_by_id::get_category_by_id,
        crate::methods::get_categories_by_kind::get_categories_by_kind,
        crate::methods::delete_category::delete_category,
        crate::methods::create_product::create_product,
        crate::methods::update_product::update_product,
        crate::methods::get_products::get_products,
        crate::methods::get_product_by_id::get_product_by_id,
        crate::methods::get_products_by_name::get_products_by_name,
        crate::methods::delete_product::delete_product
    ),
    components(schemas(
        UserRequest, UserResponse, LoginRequest, LoginResponse,
        CategoryRequest, CategoryResponse, ProductSummaryResponse,
        ProductRequest, ProductResponse, CategoryRef, CategorySummaryResponse,
        ErrorResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "usuarios", description = "Registration, login and user management"),
        (name = "categorias", description = "Game categories"),
        (name = "produtos", description = "Games on sale"),
        (name = "service", description = "Service endpoints")
    )
)]
pub struct ApiDoc;

/// Routes plus the tracing and request-id layers.
/// Connection-dependent layers are added by [`with_middleware`].
pub fn app_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(USERS_REGISTER_PATH, post(register_user))
        .route(USERS_LOGIN_PATH, post(login))
        .route(USERS_UPDATE_PATH, put(update_user))
        .route(USERS_ALL_PATH, get(get_users))
        .route(USERS_BY_ID_PATH, get(get_user_by_id));

    let catalog_routes = Router::new()
        .route(
            CATEGORIES_PATH,
            get(get_categories).post(create_category).put(update_category),
        )
        .route(
            CATEGORIES_BY_ID_PATH,
            get(get_category_by_id).delete(delete_category),
        )
        .route(CATEGORIES_BY_KIND_PATH, get(get_categories_by_kind))
        .route(
            PRODUCTS_PATH,
            get(get_products).post(create_product).put(update_product),
        )
        .route(
            PRODUCTS_BY_ID_PATH,
            get(get_product_by_id).delete(delete_product),
        )
        .route(PRODUCTS_BY_NAME_PATH, get(get_products_by_name));

    let service_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    let x_request_id = HeaderName::from_static(X_REQUEST_ID);

    Router::new()
        .merge(user_routes)
        .merge(catalog_routes)
        .merge(service_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn cors_layer(config: &MiddlewareConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        HeaderName::from_static(X_REQUEST_ID),
    ];

    if config.allows_any_origin() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
    } else {
        let origins: Vec<_> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
    }
}

/// Outer middleware stack, applied inner to outer:
/// body limit, CORS, timeout (408), rate limit.
///
/// The rate limiter keys on the peer address, so the resulting router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn with_middleware(app: Router, config: &MiddlewareConfig) -> Result<Router, String> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(config.replenish_interval_ms())
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| "failed to build rate limiter configuration".to_string())?;

    Ok(app
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(cors_layer(config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(GovernorLayer {
            config: Arc::new(governor_conf),
        }))
}
