use envoy_core::navigation::DEFAULT_NAVIGATION;
use envoy_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `navigation` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct NavigationRow {
    pub id: DbId,
    pub label: String,
    pub path: String,
    pub order: i32,
}

impl NavigationRow {
    /// The compiled default navigation, numbered from 1.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_NAVIGATION
            .iter()
            .zip(1..)
            .map(|(&(label, path), n)| Self {
                id: DbId::from(n),
                label: label.to_string(),
                path: path.to_string(),
                order: n,
            })
            .collect()
    }
}
