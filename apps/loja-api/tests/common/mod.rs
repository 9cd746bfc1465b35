#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Months, NaiveDate, Utc};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use loja_api::{app_router, AppState};
use loja_lib::auth::TokenConfig;
use loja_lib::rootuser::{initialize_root_user, RootUserConfig};

pub const ROOT_EMAIL: &str = "root@root.com";
pub const ROOT_PASSWORD: &str = "rootroot";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn token_config() -> TokenConfig {
    TokenConfig::new(
        SecretString::new("api-test-secret".to_string()),
        Duration::from_secs(3600),
    )
}

/// In-memory application with the root user already registered.
pub async fn spawn_app() -> TestApp {
    let state = AppState::in_memory(token_config(), "test");

    let root = RootUserConfig {
        email: ROOT_EMAIL.to_string(),
        name: "Root".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2000, 10, 9).unwrap(),
    };
    initialize_root_user(
        state.users.as_ref(),
        &root,
        SecretString::new(ROOT_PASSWORD.to_string()),
    )
    .await
    .expect("root user");

    TestApp {
        router: app_router(state.clone()),
        state,
    }
}

pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

pub fn root_auth() -> String {
    basic_auth(ROOT_EMAIL, ROOT_PASSWORD)
}

pub fn years_ago(years: u32) -> String {
    let date = Utc::now().date_naive() - Months::new(years * 12);
    date.format("%Y-%m-%d").to_string()
}

pub fn user_body(name: &str, email: &str, birth_date: &str) -> Value {
    json!({
        "nome": name,
        "usuario": email,
        "senha": "13465278",
        "foto": "-",
        "dataNascimento": birth_date
    })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("readable body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Value,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, auth: Option<&str>) -> TestResponse {
        self.bodyless(Method::GET, uri, auth).await
    }

    pub async fn delete(&self, uri: &str, auth: Option<&str>) -> TestResponse {
        self.bodyless(Method::DELETE, uri, auth).await
    }

    async fn bodyless(&self, method: Method, uri: &str, auth: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn create_category(&self, kind: &str) -> Value {
        let response = self
            .json(Method::POST, "/categorias", Some(&root_auth()), json!({ "tipo": kind }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    pub async fn create_product(&self, name: &str, price: f64, category_id: &str) -> Value {
        let response = self
            .json(
                Method::POST,
                "/produtos",
                Some(&root_auth()),
                json!({
                    "nome": name,
                    "preco": price,
                    "foto": "https://i.imgur.com/produto.jpg",
                    "categoria": { "id": category_id }
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }
}
