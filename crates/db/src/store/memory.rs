use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::content::{ContentFilter, ContentRow};
use crate::models::navigation::NavigationRow;
use crate::models::user::UserRow;
use crate::store::SiteStore;

#[derive(Default)]
struct Tables {
    settings: BTreeMap<String, String>,
    navigation: Vec<NavigationRow>,
    content: Vec<ContentRow>,
    users: Vec<UserRow>,
}

/// In-process [`SiteStore`].
///
/// [`set_available`](MemoryStore::set_available) simulates a database
/// outage: while unavailable every call fails with `PoolTimedOut`.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Store raw setting text as-is, valid JSON or not.
    pub async fn put_raw_setting(&self, name: &str, raw: &str) {
        self.tables
            .write()
            .await
            .settings
            .insert(name.to_string(), raw.to_string());
    }

    pub async fn push_navigation(&self, row: NavigationRow) {
        self.tables.write().await.navigation.push(row);
    }

    pub async fn push_content(&self, row: ContentRow) {
        self.tables.write().await.content.push(row);
    }

    pub async fn push_user(&self, row: UserRow) {
        self.tables.write().await.users.push(row);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }

    async fn setting_value(&self, name: &str) -> Result<Option<String>, sqlx::Error> {
        self.check()?;
        Ok(self.tables.read().await.settings.get(name).cloned())
    }

    async fn save_setting(&self, name: &str, value: &str) -> Result<(), sqlx::Error> {
        self.check()?;
        self.put_raw_setting(name, value).await;
        Ok(())
    }

    async fn insert_setting_if_absent(
        &self,
        name: &str,
        value: &str,
    ) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.settings.contains_key(name) {
            return Ok(false);
        }
        tables.settings.insert(name.to_string(), value.to_string());
        Ok(true)
    }

    async fn navigation(&self) -> Result<Vec<NavigationRow>, sqlx::Error> {
        self.check()?;
        let mut rows = self.tables.read().await.navigation.clone();
        rows.sort_by_key(|r| (r.order, r.id));
        Ok(rows)
    }

    async fn content(&self, filter: &ContentFilter) -> Result<Vec<ContentRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .content
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        self.check()?;
        let email = email.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn insert_if_absent_only_inserts_once() {
        let store = MemoryStore::new();
        assert!(store.insert_setting_if_absent("hero", "{}").await.unwrap());
        assert!(!store.insert_setting_if_absent("hero", "[]").await.unwrap());
        assert_eq!(store.setting_value("hero").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert_matches!(store.ping().await, Err(sqlx::Error::PoolTimedOut));
        assert_matches!(store.setting_value("hero").await, Err(sqlx::Error::PoolTimedOut));

        store.set_available(true);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn navigation_is_sorted_by_order() {
        let store = MemoryStore::new();
        for (id, order) in [(1, 3), (2, 1), (3, 2)] {
            store
                .push_navigation(NavigationRow {
                    id,
                    label: format!("n{id}"),
                    path: format!("/n{id}"),
                    order,
                })
                .await;
        }
        let ids: Vec<_> = store.navigation().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
