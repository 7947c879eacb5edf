use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::ACCESS_COOKIE;
use crate::auth::jwt::{self, ACCESS_TOKEN_MINUTES, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{Account, Role, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub account: Account,
}

pub fn session_cookie(access_token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE, access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(ACCESS_TOKEN_MINUTES))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

fn issue_token(state: &SharedState, user: &User) -> Result<String, AppError> {
    let role = Role::parse(&user.role)
        .ok_or_else(|| AppError::Internal(format!("Unknown role '{}'", user.role)))?;
    let claims = Claims::new(user.id, user.account_id, role);
    jwt::encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)
}

/// Check credentials against the login limiter and the stored hash.
pub async fn authenticate(
    state: &SharedState,
    email: &str,
    password_attempt: &str,
) -> Result<(User, String), AppError> {
    if state.login_limiter.check(email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, email).await? else {
        state.login_limiter.record_failure(email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(password_attempt, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(email);
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.clear(email);
    let token = issue_token(state, &user)?;
    Ok((user, token))
}

/// Bootstrap registration: only the very first user can sign up, and becomes admin.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.username.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::BadRequest)?;

    // Advisory lock prevents concurrent bootstrap registrations
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    if db::users::count_all(&mut *tx).await? > 0 {
        return Err(AppError::Forbidden(
            "Registration is closed. Ask an administrator for an account.".to_string(),
        ));
    }

    let account = db::accounts::create(&mut *tx, &req.username, &req.username, false).await?;
    let user = db::users::create(
        &mut *tx,
        account.id,
        &req.email,
        &pw_hash,
        Role::Admin.as_str(),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, account_id = %account.id, "Bootstrap admin registered");

    let access_token = issue_token(&state, &user)?;
    let jar = CookieJar::new().add(session_cookie(&access_token, state.config.secure_cookies));
    Ok((jar, Json(AuthResponse {
        access_token,
        account,
    })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let (user, access_token) = authenticate(&state, &req.email, &req.password).await?;

    let account = db::accounts::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| AppError::Internal("User without account".to_string()))?;

    let jar = CookieJar::new().add(session_cookie(&access_token, state.config.secure_cookies));
    Ok((jar, Json(AuthResponse {
        access_token,
        account,
    })))
}

pub async fn logout() -> (CookieJar, Json<serde_json::Value>) {
    let jar = CookieJar::new().add(clear_session_cookie());
    (jar, Json(serde_json::json!({ "message": "Logged out" })))
}
