use envoy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub last_updated: Timestamp,
}
