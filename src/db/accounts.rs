use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Account;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    username: &str,
    display_name: &str,
    discoverable: bool,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, display_name, discoverable)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(username)
    .bind(display_name)
    .bind(discoverable)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Fetch several accounts at once, in no particular order.
pub async fn find_many(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}
