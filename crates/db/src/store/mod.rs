//! Data-access seam between HTTP handlers and the database.
//!
//! Handlers and [`SettingsStore`](crate::SettingsStore) talk to a
//! [`SiteStore`] rather than a pool so that the database can be swapped for
//! [`MemoryStore`] in tests and previews.

mod memory;
mod mysql;

use async_trait::async_trait;

use crate::models::content::{ContentFilter, ContentRow};
use crate::models::navigation::NavigationRow;
use crate::models::user::UserRow;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Every query the site API issues.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Confirm the backing database is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Raw JSON text stored under a setting name.
    async fn setting_value(&self, name: &str) -> Result<Option<String>, sqlx::Error>;

    /// Replace the document stored under a setting name.
    async fn save_setting(&self, name: &str, value: &str) -> Result<(), sqlx::Error>;

    /// Insert a setting only if its name has no row yet. Returns `true` when
    /// a row was inserted.
    async fn insert_setting_if_absent(&self, name: &str, value: &str)
        -> Result<bool, sqlx::Error>;

    /// Navigation rows in display order.
    async fn navigation(&self) -> Result<Vec<NavigationRow>, sqlx::Error>;

    /// Content rows matching `filter`.
    async fn content(&self, filter: &ContentFilter) -> Result<Vec<ContentRow>, sqlx::Error>;

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error>;
}
