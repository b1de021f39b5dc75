use envoy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRow {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub content_type: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: String,
    pub show_in_navigation: bool,
    pub publish_date: Option<Timestamp>,
    pub last_updated: Timestamp,
}

/// Optional equality filters for content listing (`?type=&slug=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFilter {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub slug: Option<String>,
    #[serde(skip)]
    pub id: Option<DbId>,
}

impl ContentFilter {
    pub fn by_id(id: DbId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Whether `row` passes every set filter.
    pub fn matches(&self, row: &ContentRow) -> bool {
        self.id.map_or(true, |id| row.id == id)
            && self
                .content_type
                .as_deref()
                .map_or(true, |t| row.content_type == t)
            && self.slug.as_deref().map_or(true, |s| row.slug == s)
    }
}
