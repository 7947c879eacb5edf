use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{ActionKind, ActionLog};

pub async fn create(
    conn: &mut PgConnection,
    account_id: Uuid,
    action: ActionKind,
    target_type: &str,
    target_id: Uuid,
) -> Result<ActionLog, sqlx::Error> {
    sqlx::query_as::<_, ActionLog>(
        "INSERT INTO admin_action_logs (account_id, action, target_type, target_id)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(account_id)
    .bind(action.as_str())
    .bind(target_type)
    .bind(target_id)
    .fetch_one(conn)
    .await
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<ActionLog>, sqlx::Error> {
    sqlx::query_as::<_, ActionLog>(
        "SELECT * FROM admin_action_logs
         ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_by_target(
    pool: &PgPool,
    target_type: &str,
    target_id: Uuid,
) -> Result<Vec<ActionLog>, sqlx::Error> {
    sqlx::query_as::<_, ActionLog>(
        "SELECT * FROM admin_action_logs WHERE target_type = $1 AND target_id = $2
         ORDER BY created_at DESC, id DESC",
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_all(pool)
    .await
}
