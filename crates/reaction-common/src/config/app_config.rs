//! Application configuration structs
//!
//! Loads configuration from environment variables, after reading `.env` if present.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub sync: SyncConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where reaction records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl StorageBackend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// Store selection and per-operation deadline
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Limits applied to sync queries arriving over HTTP
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SyncConfig {
    /// Limit used when the request has none; 0 means unlimited
    #[serde(default)]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl SyncConfig {
    /// Resolve the effective limit for a request
    #[must_use]
    pub fn clamp(&self, requested: Option<u32>) -> Option<u32> {
        match requested {
            Some(limit) => Some(limit.min(self.max_limit)),
            None if self.default_limit > 0 => Some(self.default_limit.min(self.max_limit)),
            None => None,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_limit: 0,
            max_limit: default_max_limit(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "reaction-store".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_max_limit() -> u32 {
    1000
}

fn default_operation_timeout_ms() -> u64 {
    5000
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Read an optional variable, rejecting values that do not parse
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = StoreConfig {
            backend: match env::var("STORAGE_BACKEND") {
                Ok(raw) => raw.parse()?,
                Err(_) => StorageBackend::default(),
            },
            operation_timeout_ms: parse_var("STORE_OPERATION_TIMEOUT_MS")?
                .unwrap_or_else(default_operation_timeout_ms),
        };

        let database = match (store.backend, env::var("DATABASE_URL")) {
            (_, Ok(url)) => Some(DatabaseConfig {
                url,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                run_migrations: parse_var("DATABASE_RUN_MIGRATIONS")?.unwrap_or(true),
            }),
            (StorageBackend::Postgres, Err(_)) => {
                return Err(ConfigError::MissingVar("DATABASE_URL"))
            }
            (StorageBackend::Memory, Err(_)) => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: match env::var("APP_ENV") {
                    Ok(raw) => raw.parse()?,
                    Err(_) => Environment::default(),
                },
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            store,
            database,
            jwt: JwtConfig {
                secret: require_var("JWT_SECRET")?,
                access_token_expiry: parse_var("JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_access_token_expiry),
            },
            sync: SyncConfig {
                default_limit: parse_var("SYNC_DEFAULT_LIMIT")?.unwrap_or(0),
                max_limit: parse_var("SYNC_MAX_LIMIT")?.unwrap_or_else(default_max_limit),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }

    /// Configuration for an in-memory server, used by tests and local runs
    #[must_use]
    pub fn in_memory(port: u16, jwt_secret: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port,
            },
            store: StoreConfig {
                backend: StorageBackend::Memory,
                ..StoreConfig::default()
            },
            database: None,
            jwt: JwtConfig {
                secret: jwt_secret.into(),
                access_token_expiry: default_access_token_expiry(),
            },
            sync: SyncConfig::default(),
            rate_limit: RateLimitConfig {
                requests_per_second: 1000,
                burst: 1000,
            },
            cors: CorsConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
