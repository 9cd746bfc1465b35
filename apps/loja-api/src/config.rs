use std::str::FromStr;
use std::time::Duration;

use loja_lib::auth::{TokenConfig, DEFAULT_TOKEN_TTL};
use secrecy::SecretString;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, JWT_SECRET, LOCAL_ENV, MAX_BODY_SIZE_BYTES, RATE_LIMIT_BURST,
    RATE_LIMIT_PER_MINUTE, REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS, TOKEN_TTL_SECS,
};

const LOCAL_JWT_SECRET: &str = "loja-local-development-secret";

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(env_var = key, value = %raw, "ignoring unparsable configuration value");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let rate_limit_per_minute = parsed(&lookup, RATE_LIMIT_PER_MINUTE)
            .filter(|v: &u32| *v > 0)
            .unwrap_or(default.rate_limit_per_minute);

        let rate_limit_burst = parsed(&lookup, RATE_LIMIT_BURST)
            .filter(|v: &u32| *v > 0)
            .unwrap_or(default.rate_limit_burst);

        let request_timeout = parsed(&lookup, REQUEST_TIMEOUT_SECS)
            .map(Duration::from_secs)
            .unwrap_or(default.request_timeout);

        let max_body_size = parsed(&lookup, MAX_BODY_SIZE_BYTES).unwrap_or(default.max_body_size);

        let shutdown_timeout = parsed(&lookup, SHUTDOWN_TIMEOUT_SECS)
            .map(Duration::from_secs)
            .unwrap_or(default.shutdown_timeout);

        let cors_allowed_origins = lookup(CORS_ALLOWED_ORIGINS)
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute,
            rate_limit_burst,
            request_timeout,
            max_body_size,
            shutdown_timeout,
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Milliseconds between two replenished rate-limit permits.
    pub fn replenish_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_limit_per_minute.max(1))).max(1)
    }
}

/// Signing configuration for login tokens.
#[derive(Debug)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn from_env(env: &str) -> Result<Self, String> {
        Self::from_lookup(env, |key| std::env::var(key).ok())
    }

    /// `JWT_SECRET` is mandatory everywhere except the local environment.
    pub fn from_lookup(env: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let jwt_secret = match lookup(JWT_SECRET).filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if env == LOCAL_ENV => {
                tracing::warn!("{JWT_SECRET} not set, using the local development secret");
                LOCAL_JWT_SECRET.to_string()
            }
            None => return Err(format!("{JWT_SECRET} environment variable must be set")),
        };

        let token_ttl = parsed(&lookup, TOKEN_TTL_SECS)
            .filter(|v: &u64| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);

        Ok(Self {
            jwt_secret: SecretString::new(jwt_secret),
            token_ttl,
        })
    }

    pub fn into_token_config(self) -> TokenConfig {
        TokenConfig::new(self.jwt_secret, self.token_ttl)
    }
}
