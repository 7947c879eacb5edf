use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::ActionLog;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LogParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

const MAX_PAGE: i64 = 100_000;

impl LogParams {
    /// 1-based page number, clamped to 1..=100000.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    /// (limit, offset) with `per_page` clamped to 1..=100.
    pub fn window(&self) -> (i64, i64) {
        let per_page = self.per_page.unwrap_or(40).clamp(1, 100);
        (per_page, (self.page() - 1) * per_page)
    }
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<LogParams>,
) -> Result<Json<Vec<ActionLog>>, AppError> {
    auth.require_moderator()?;
    let (limit, offset) = params.window();
    let logs = db::action_logs::list(&state.pool, limit, offset).await?;
    Ok(Json(logs))
}
