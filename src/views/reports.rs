use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::moderation::lifecycle::REPORT_TARGET_TYPE;
use crate::routes::reports::{LIST_LIMIT, ListParams};
use crate::state::SharedState;

use super::{current_username, username_or_unknown, usernames};

pub struct ReportRow {
    pub id: Uuid,
    pub comment: String,
    pub reporter: String,
    pub target: String,
    pub assignee: String,
    pub resolved_by: String,
    pub resolved_at: String,
    pub created_at: String,
}

pub struct LogRow {
    pub actor: String,
    pub action: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "admin/reports/index.html")]
struct IndexTemplate {
    username: String,
    resolved: bool,
    reports: Vec<ReportRow>,
}

#[derive(Template)]
#[template(path = "admin/reports/show.html")]
struct ShowTemplate {
    username: String,
    report: ReportRow,
    is_resolved: bool,
    assigned_to_me: bool,
    is_assigned: bool,
    logs: Vec<LogRow>,
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    auth.require_moderator()?;

    let resolved = params.resolved();
    let reports = db::reports::list(&state.pool, resolved, LIST_LIMIT).await?;

    let names = usernames(
        &state,
        reports.iter().flat_map(|r| {
            [
                Some(r.account_id),
                Some(r.target_account_id),
                r.assigned_account_id,
                r.action_taken_by_account_id,
            ]
            .into_iter()
            .flatten()
        }),
    )
    .await?;

    let rows = reports
        .into_iter()
        .map(|r| ReportRow {
            id: r.id,
            comment: r.comment,
            reporter: username_or_unknown(&names, Some(r.account_id)),
            target: username_or_unknown(&names, Some(r.target_account_id)),
            assignee: username_or_unknown(&names, r.assigned_account_id),
            resolved_by: username_or_unknown(&names, r.action_taken_by_account_id),
            resolved_at: r
                .action_taken_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            created_at: r.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    let template = IndexTemplate {
        username: current_username(&state, &auth).await?,
        resolved,
        reports: rows,
    };
    Ok(Html(template.render()?))
}

pub async fn show(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    auth.require_moderator()?;

    let report = db::reports::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
    let logs = db::action_logs::list_by_target(&state.pool, REPORT_TARGET_TYPE, id).await?;

    let names = usernames(
        &state,
        [
            Some(report.account_id),
            Some(report.target_account_id),
            report.assigned_account_id,
            report.action_taken_by_account_id,
        ]
        .into_iter()
        .flatten()
        .chain(logs.iter().map(|l| l.account_id)),
    )
    .await?;

    let log_rows = logs
        .into_iter()
        .map(|l| LogRow {
            actor: username_or_unknown(&names, Some(l.account_id)),
            action: l.action,
            created_at: l.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    let template = ShowTemplate {
        username: current_username(&state, &auth).await?,
        is_resolved: report.action_taken(),
        assigned_to_me: report.assigned_account_id == Some(auth.account_id),
        is_assigned: report.is_assigned(),
        report: ReportRow {
            id: report.id,
            reporter: username_or_unknown(&names, Some(report.account_id)),
            target: username_or_unknown(&names, Some(report.target_account_id)),
            assignee: username_or_unknown(&names, report.assigned_account_id),
            resolved_by: username_or_unknown(&names, report.action_taken_by_account_id),
            resolved_at: report
                .action_taken_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            created_at: report.created_at.format("%Y-%m-%d %H:%M").to_string(),
            comment: report.comment,
        },
        logs: log_rows,
    };
    Ok(Html(template.render()?))
}

pub async fn resolve(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    auth.require_moderator()?;
    state.reports.resolve(id, auth.account_id).await?;
    Ok(Redirect::to("/admin/reports"))
}

pub async fn reopen(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    auth.require_moderator()?;
    state.reports.reopen(id, auth.account_id).await?;
    Ok(Redirect::to(&format!("/admin/reports/{id}")))
}

pub async fn assign_to_self(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    auth.require_moderator()?;
    state.reports.assign_to_self(id, auth.account_id).await?;
    Ok(Redirect::to(&format!("/admin/reports/{id}")))
}

pub async fn unassign(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    auth.require_moderator()?;
    state.reports.unassign(id, auth.account_id).await?;
    Ok(Redirect::to(&format!("/admin/reports/{id}")))
}
