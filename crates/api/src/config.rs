use axum::http::HeaderValue;
use envoy_db::DbConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// MySQL connection parameters.
    pub database: DbConfig,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var: name,
        expected,
        value,
    })
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.to_string())))
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `API_PORT`             | `3001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_HOST`              | `localhost`                |
    /// | `DB_PORT`              | `3306`                     |
    /// | `DB_USER`              | `root`                     |
    /// | `DB_PASSWORD`          | (empty)                    |
    /// | `DB_NAME`              | `trojan_envoy`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DbConfig {
            host: var_or("DB_HOST", "localhost"),
            port: parse_var("DB_PORT", "3306", "u16")?,
            user: var_or("DB_USER", "root"),
            password: var_or("DB_PASSWORD", ""),
            database: var_or("DB_NAME", "trojan_envoy"),
        };

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("API_PORT", "3001", "u16")?,
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "http://localhost:5173"))?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30", "u64")?,
            database,
        })
    }
}
