use sqlx::PgPool;
use uuid::Uuid;

use crate::models::FeaturedTag;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    account_id: Uuid,
    tag_id: Uuid,
    name: &str,
) -> Result<FeaturedTag, sqlx::Error> {
    sqlx::query_as::<_, FeaturedTag>(
        "INSERT INTO featured_tags (account_id, tag_id, name)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(account_id)
    .bind(tag_id)
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn list_by_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<FeaturedTag>, sqlx::Error> {
    sqlx::query_as::<_, FeaturedTag>(
        "SELECT * FROM featured_tags WHERE account_id = $1 ORDER BY created_at ASC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

pub async fn count_by_account<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    account_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM featured_tags WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

/// Delete a featured tag owned by `account_id`. Returns false if none matched.
pub async fn delete_scoped(pool: &PgPool, id: Uuid, account_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM featured_tags WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
