use async_trait::async_trait;

use crate::models::content::{ContentFilter, ContentRow};
use crate::models::navigation::NavigationRow;
use crate::models::user::UserRow;
use crate::repositories::{ContentRepo, NavigationRepo, SettingRepo, UserRepo};
use crate::store::SiteStore;
use crate::DbPool;

/// [`SiteStore`] backed by the MySQL repositories.
#[derive(Clone)]
pub struct MySqlStore {
    pool: DbPool,
}

impl MySqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SiteStore for MySqlStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn setting_value(&self, name: &str) -> Result<Option<String>, sqlx::Error> {
        SettingRepo::find_value(&self.pool, name).await
    }

    async fn save_setting(&self, name: &str, value: &str) -> Result<(), sqlx::Error> {
        SettingRepo::upsert(&self.pool, name, value).await
    }

    async fn insert_setting_if_absent(
        &self,
        name: &str,
        value: &str,
    ) -> Result<bool, sqlx::Error> {
        SettingRepo::insert_if_absent(&self.pool, name, value).await
    }

    async fn navigation(&self) -> Result<Vec<NavigationRow>, sqlx::Error> {
        NavigationRepo::list_ordered(&self.pool).await
    }

    async fn content(&self, filter: &ContentFilter) -> Result<Vec<ContentRow>, sqlx::Error> {
        ContentRepo::list(&self.pool, filter).await
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        UserRepo::find_by_email(&self.pool, email).await
    }
}
