use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{Account, Role, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub discoverable: bool,
}

#[derive(Serialize)]
pub struct CreatedUser {
    pub user: User,
    pub account: Account,
}

pub async fn create_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<Json<CreatedUser>, AppError> {
    auth.require_admin()?;

    if req.username.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Username and email are required".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::BadRequest)?;
    let display_name = req.display_name.as_deref().unwrap_or(&req.username);

    let conflict = |e: sqlx::Error| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username or email is already taken".to_string())
        }
        _ => AppError::Database(e),
    };

    let mut tx = state.pool.begin().await?;
    let account = db::accounts::create(&mut *tx, &req.username, display_name, req.discoverable)
        .await
        .map_err(conflict)?;
    let user = db::users::create(
        &mut *tx,
        account.id,
        &req.email,
        &pw_hash,
        req.role.as_str(),
    )
    .await
    .map_err(conflict)?;
    tx.commit().await?;

    tracing::info!(
        created_by = %auth.account_id,
        user_id = %user.id,
        role = req.role.as_str(),
        "User created"
    );

    Ok(Json(CreatedUser { user, account }))
}
