use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Account;

/// Discoverable accounts the viewer has not dismissed, newest first.
pub async fn list_for(
    pool: &PgPool,
    account_id: Uuid,
    limit: i64,
) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT a.* FROM accounts a
         WHERE a.discoverable
           AND a.id <> $1
           AND NOT EXISTS (
               SELECT 1 FROM suggestion_dismissals d
               WHERE d.account_id = $1 AND d.target_account_id = a.id
           )
         ORDER BY a.created_at DESC, a.id DESC
         LIMIT $2",
    )
    .bind(account_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn dismiss(
    pool: &PgPool,
    account_id: Uuid,
    target_account_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO suggestion_dismissals (account_id, target_account_id)
         VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(account_id)
    .bind(target_account_id)
    .execute(pool)
    .await?;
    Ok(())
}
