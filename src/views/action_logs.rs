use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::routes::action_logs::LogParams;
use crate::state::SharedState;

use super::{current_username, username_or_unknown, usernames};

pub struct EntryRow {
    pub actor: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "admin/action_logs.html")]
struct ActionLogsTemplate {
    username: String,
    entries: Vec<EntryRow>,
    page: i64,
    has_next: bool,
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<LogParams>,
) -> Result<Html<String>, AppError> {
    auth.require_moderator()?;

    let (limit, offset) = params.window();
    let logs = db::action_logs::list(&state.pool, limit, offset).await?;
    let names = usernames(&state, logs.iter().map(|l| l.account_id)).await?;
    let has_next = logs.len() as i64 == limit;

    let entries = logs
        .into_iter()
        .map(|l| EntryRow {
            actor: username_or_unknown(&names, Some(l.account_id)),
            action: l.action,
            target_type: l.target_type,
            target_id: l.target_id.to_string(),
            created_at: l.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    let template = ActionLogsTemplate {
        username: current_username(&state, &auth).await?,
        entries,
        page: params.page(),
        has_next,
    };
    Ok(Html(template.render()?))
}
