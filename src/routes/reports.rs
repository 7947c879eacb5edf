use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{ActionLog, Report};
use crate::moderation::ReportAction;
use crate::moderation::lifecycle::REPORT_TARGET_TYPE;
use crate::state::SharedState;

pub const LIST_LIMIT: i64 = 100;
const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Deserialize)]
pub struct CreateReport {
    pub account_id: Uuid,
    #[serde(default)]
    pub comment: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub resolved: Option<String>,
}

impl ListParams {
    /// `resolved=1` and `resolved=true` select resolved reports.
    pub fn resolved(&self) -> bool {
        matches!(self.resolved.as_deref(), Some("1" | "true"))
    }
}

#[derive(Serialize)]
pub struct ReportDetail {
    pub report: Report,
    pub action_logs: Vec<ActionLog>,
}

/// File a report against another account.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateReport>,
) -> Result<Json<Report>, AppError> {
    if req.account_id == auth.account_id {
        return Err(AppError::BadRequest("You cannot report yourself".to_string()));
    }
    if req.comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Comment is too long (maximum is {MAX_COMMENT_LENGTH} characters)"
        )));
    }

    db::accounts::find_by_id(&state.pool, req.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    let report = db::reports::create(&state.pool, auth.account_id, req.account_id, &req.comment).await?;
    tracing::info!(report_id = %report.id, reporter = %auth.account_id, "Report filed");

    Ok(Json(report))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Report>>, AppError> {
    auth.require_moderator()?;
    let reports = db::reports::list(&state.pool, params.resolved(), LIST_LIMIT).await?;
    Ok(Json(reports))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportDetail>, AppError> {
    auth.require_moderator()?;

    let report = db::reports::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
    let action_logs = db::action_logs::list_by_target(&state.pool, REPORT_TARGET_TYPE, id).await?;

    Ok(Json(ReportDetail {
        report,
        action_logs,
    }))
}

/// `POST /api/v1/admin/reports/{id}/{action}`
pub async fn transition(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((id, action)): Path<(Uuid, String)>,
) -> Result<Json<Report>, AppError> {
    auth.require_moderator()?;

    let action = ReportAction::parse(&action)
        .ok_or_else(|| AppError::NotFound(format!("Unknown report action: {action}")))?;
    let report = state.reports.perform(id, auth.account_id, action).await?;

    Ok(Json(report))
}
