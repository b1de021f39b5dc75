//! Repository for the `settings` table.

use sqlx::MySqlPool;

use crate::models::setting::SettingRow;

/// Provides data access for named settings.
pub struct SettingRepo;

impl SettingRepo {
    /// Raw JSON text stored under `name`, if any.
    pub async fn find_value(pool: &MySqlPool, name: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Replace the whole document stored under `name`.
    pub async fn upsert(pool: &MySqlPool, name: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO settings (name, value) VALUES (?, ?) \
             ON DUPLICATE KEY UPDATE value = VALUES(value)",
        )
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert `value` only when no row exists for `name`.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn insert_if_absent(
        pool: &MySqlPool,
        name: &str,
        value: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("INSERT IGNORE INTO settings (name, value) VALUES (?, ?)")
            .bind(name)
            .bind(value)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Every stored setting row, by name.
    pub async fn list(pool: &MySqlPool) -> Result<Vec<SettingRow>, sqlx::Error> {
        sqlx::query_as::<_, SettingRow>("SELECT name, value FROM settings ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
