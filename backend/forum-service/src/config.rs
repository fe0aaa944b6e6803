/// Configuration management for Forum Service
///
/// All settings come from environment variables; `main` loads `.env` first.
use db_pool::env_utils::{parse_env_flag, parse_env_with_default};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// External authenticator
    pub auth: AuthConfig,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL; pool sizing is read by `db_pool::DbConfig`
    pub url: String,
}

/// Authenticator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the service exposing `GET /auth/me`
    pub service_url: String,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "http://localhost:3000".to_string(),
        };
        if production && allowed_origins.split(',').any(|o| o.trim() == "*") {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("FORUM_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_with_default("FORUM_SERVICE_PORT", 8080),
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig { url: database_url },
            auth: AuthConfig {
                service_url: std::env::var("AUTH_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                request_timeout_ms: parse_env_with_default("AUTH_REQUEST_TIMEOUT_MS", 5000),
            },
            run_migrations: parse_env_flag("RUN_MIGRATIONS", true),
        })
    }
}
