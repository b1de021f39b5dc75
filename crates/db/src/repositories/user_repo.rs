//! Repository for the `users` table.

use sqlx::MySqlPool;

use crate::models::user::UserRow;

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_email(
        pool: &MySqlPool,
        email: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, role, last_updated FROM users WHERE email = ?",
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await
    }
}
