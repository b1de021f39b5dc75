use serde::Serialize;
use sqlx::FromRow;

/// A row from the `settings` table. `value` is raw JSON text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SettingRow {
    pub name: String,
    pub value: String,
}
