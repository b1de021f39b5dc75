//! MySQL persistence for the Trojan Envoy site API.
//!
//! - [`repositories`]: zero-sized repositories issuing SQL against a pool.
//! - [`store`]: the [`SiteStore`] data-access trait handlers depend on,
//!   with MySQL and in-memory implementations.
//! - [`settings`]: [`SettingsStore`], named settings with compiled defaults.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

pub mod models;
pub mod repositories;
pub mod settings;
pub mod store;

pub use settings::SettingsStore;
pub use store::{MemoryStore, MySqlStore, SiteStore};

pub type DbPool = sqlx::MySqlPool;

/// Connection parameters for the site database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Create a connection pool.
///
/// The pool connects lazily: the server can start, and serve compiled
/// defaults, while the database is still unreachable.
pub fn create_pool(config: &DbConfig) -> DbPool {
    MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(config.connect_options())
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
