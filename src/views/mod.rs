pub mod action_logs;
pub mod auth;
pub mod featured_tags;
pub mod reports;

use std::collections::HashMap;

use axum::Router;
use axum::routing::{get, post};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

/// Login and logout pages; reachable without a session.
pub fn auth_view_routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/login", get(auth::login_page).post(auth::login_submit))
        .route("/auth/logout", post(auth::logout_submit))
}

/// Pages that need a session. Wrapped by the login redirect in `build_app`.
pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Moderation
        .route("/admin/reports", get(reports::index))
        .route("/admin/reports/{id}", get(reports::show))
        .route(
            "/admin/reports/{id}/resolve",
            post(reports::resolve).put(reports::resolve),
        )
        .route(
            "/admin/reports/{id}/reopen",
            post(reports::reopen).put(reports::reopen),
        )
        .route(
            "/admin/reports/{id}/assign_to_self",
            post(reports::assign_to_self).put(reports::assign_to_self),
        )
        .route(
            "/admin/reports/{id}/unassign",
            post(reports::unassign).put(reports::unassign),
        )
        .route("/admin/action_logs", get(action_logs::index))
        // Settings
        .route(
            "/settings/featured_tags",
            get(featured_tags::index).post(featured_tags::create),
        )
        .route(
            "/settings/featured_tags/{id}",
            axum::routing::delete(featured_tags::destroy),
        )
        .route(
            "/settings/featured_tags/{id}/delete",
            post(featured_tags::destroy),
        )
}

/// Username of the signed-in account, for the page header.
async fn current_username(state: &SharedState, auth: &AuthUser) -> Result<String, AppError> {
    let account = db::accounts::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(account.username)
}

/// Resolve account ids to usernames in one query.
async fn usernames(
    state: &SharedState,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, String>, AppError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let accounts = db::accounts::find_many(&state.pool, &ids).await?;
    Ok(accounts.into_iter().map(|a| (a.id, a.username)).collect())
}

fn username_or_unknown(names: &HashMap<Uuid, String>, id: Option<Uuid>) -> String {
    id.and_then(|id| names.get(&id).cloned()).unwrap_or_default()
}
