use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Report;

pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    target_account_id: Uuid,
    comment: &str,
) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "INSERT INTO reports (account_id, target_account_id, comment)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(account_id)
    .bind(target_account_id)
    .bind(comment)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Load a report and hold its row lock until the surrounding transaction ends.
pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Unresolved reports when `resolved` is false, resolved ones otherwise.
pub async fn list(pool: &PgPool, resolved: bool, limit: i64) -> Result<Vec<Report>, sqlx::Error> {
    let sql = if resolved {
        "SELECT * FROM reports WHERE action_taken_at IS NOT NULL
         ORDER BY created_at DESC LIMIT $1"
    } else {
        "SELECT * FROM reports WHERE action_taken_at IS NULL
         ORDER BY created_at DESC LIMIT $1"
    };

    sqlx::query_as::<_, Report>(sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Write back the mutable lifecycle columns of a report.
pub async fn update_state(
    conn: &mut PgConnection,
    report: &Report,
    now: DateTime<Utc>,
) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "UPDATE reports
         SET action_taken_at = $2,
             action_taken_by_account_id = $3,
             assigned_account_id = $4,
             updated_at = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(report.id)
    .bind(report.action_taken_at)
    .bind(report.action_taken_by_account_id)
    .bind(report.assigned_account_id)
    .bind(now)
    .fetch_one(conn)
    .await
}
