pub const SERVICE: &str = "loja-api";
pub const ENV: &str = "ENV";

pub const LOCAL_ENV: &str = "local";

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_RETRIES: u32 = 10;

pub const LOJA_API_PORT: &str = "LOJA_API_PORT";
pub const DEFAULT_PORT: u16 = 3333;

// Persistence backend: "mysql" (default) or "memory"
pub const STORAGE: &str = "STORAGE";
pub const STORAGE_MEMORY: &str = "memory";

// Login tokens
pub const JWT_SECRET: &str = "JWT_SECRET";
pub const TOKEN_TTL_SECS: &str = "TOKEN_TTL_SECS";

// Middleware configuration
pub const RATE_LIMIT_PER_MINUTE: &str = "RATE_LIMIT_PER_MINUTE";
pub const RATE_LIMIT_BURST: &str = "RATE_LIMIT_BURST";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const MAX_BODY_SIZE_BYTES: &str = "MAX_BODY_SIZE_BYTES";
pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";

pub const BASIC_REALM: &str = "loja";
