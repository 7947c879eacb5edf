use crate::models::Tag;

/// Return the tag with this name (case-insensitive), creating it if needed.
pub async fn find_or_create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    name: &str,
) -> Result<Tag, sqlx::Error> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (name) VALUES ($1)
         ON CONFLICT ((lower(name))) DO UPDATE SET name = tags.name
         RETURNING *",
    )
    .bind(name)
    .fetch_one(executor)
    .await
}
