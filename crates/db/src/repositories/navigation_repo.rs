//! Repository for the `navigation` table.

use sqlx::MySqlPool;

use crate::models::navigation::NavigationRow;

pub struct NavigationRepo;

impl NavigationRepo {
    /// All entries in display order.
    pub async fn list_ordered(pool: &MySqlPool) -> Result<Vec<NavigationRow>, sqlx::Error> {
        sqlx::query_as::<_, NavigationRow>(
            "SELECT id, label, path, `order` FROM navigation ORDER BY `order`, id",
        )
        .fetch_all(pool)
        .await
    }
}
