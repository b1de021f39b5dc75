//! Repository for the `content` table.

use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::models::content::{ContentFilter, ContentRow};

/// Column list for `content` queries.
const COLUMNS: &str = "\
    id, title, slug, `type`, description, content, status, \
    show_in_navigation, publish_date, last_updated";

pub struct ContentRepo;

impl ContentRepo {
    /// Content rows matching every filter that is set.
    pub async fn list(
        pool: &MySqlPool,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentRow>, sqlx::Error> {
        let mut query: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM content WHERE 1 = 1"));
        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        if let Some(content_type) = &filter.content_type {
            query.push(" AND `type` = ").push_bind(content_type.clone());
        }
        if let Some(slug) = &filter.slug {
            query.push(" AND slug = ").push_bind(slug.clone());
        }
        query.push(" ORDER BY id");

        query.build_query_as::<ContentRow>().fetch_all(pool).await
    }
}
