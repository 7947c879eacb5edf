use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Suggestion;
use crate::state::SharedState;

const DEFAULT_LIMIT: i64 = 40;
const MAX_LIMIT: i64 = 80;

#[derive(Deserialize)]
pub struct SuggestionParams {
    pub limit: Option<i64>,
}

/// `GET /api/v2/suggestions`
pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let accounts = db::suggestions::list_for(&state.pool, auth.account_id, limit).await?;

    let suggestions = accounts
        .into_iter()
        .map(|account| Suggestion {
            source: "global".to_string(),
            account,
        })
        .collect();

    Ok(Json(suggestions))
}

/// `DELETE /api/v1/suggestions/{account_id}`
pub async fn dismiss(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::accounts::find_by_id(&state.pool, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    db::suggestions::dismiss(&state.pool, auth.account_id, account_id).await?;
    tracing::debug!(account_id = %auth.account_id, dismissed = %account_id, "Suggestion dismissed");

    Ok(Json(serde_json::json!({})))
}
