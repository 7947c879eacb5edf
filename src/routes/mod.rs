pub mod action_logs;
pub mod admin;
pub mod auth;
pub mod reports;
pub mod suggestions;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        // Reporting
        .route("/api/v1/reports", post(reports::create))
        // Moderation
        .route("/api/v1/admin/reports", get(reports::list))
        .route("/api/v1/admin/reports/{id}", get(reports::get))
        .route("/api/v1/admin/reports/{id}/{action}", post(reports::transition))
        .route("/api/v1/admin/action_logs", get(action_logs::list))
        // Admin
        .route("/api/v1/admin/users", post(admin::create_user))
        // Suggestions
        .route("/api/v2/suggestions", get(suggestions::list))
        .route("/api/v1/suggestions/{account_id}", delete(suggestions::dismiss))
}
