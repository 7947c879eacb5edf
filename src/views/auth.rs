use askama::Template;
use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::extractor::ACCESS_COOKIE;
use crate::auth::jwt;
use crate::error::AppError;
use crate::middleware::auth_redirect::safe_return_path;
use crate::routes::auth::{authenticate, clear_session_cookie, session_cookie};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
    return_to: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub return_to: Option<String>,
}

fn render_login(status: StatusCode, error: Option<String>, return_to: &str) -> Response {
    let template = LoginTemplate {
        error,
        return_to: return_to.to_string(),
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn login_page(
    State(state): State<SharedState>,
    Query(q): Query<LoginQuery>,
    jar: CookieJar,
) -> Response {
    let return_to = safe_return_path(q.return_to.as_deref());

    if let Some(cookie) = jar.get(ACCESS_COOKIE) {
        if jwt::decode_token(cookie.value(), &state.config.jwt_secret).is_ok() {
            return Redirect::to(return_to).into_response();
        }
    }

    render_login(StatusCode::OK, None, return_to)
}

pub async fn login_submit(State(state): State<SharedState>, Form(form): Form<LoginForm>) -> Response {
    let return_to = safe_return_path(form.return_to.as_deref());

    match authenticate(&state, &form.email, &form.password).await {
        Ok((_, token)) => {
            let jar = CookieJar::new().add(session_cookie(&token, state.config.secure_cookies));
            (jar, Redirect::to(return_to)).into_response()
        }
        Err(AppError::Unauthorized(_)) => render_login(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("Invalid email or password".to_string()),
            return_to,
        ),
        Err(AppError::RateLimited(msg)) => {
            render_login(StatusCode::TOO_MANY_REQUESTS, Some(msg), return_to)
        }
        Err(e) => e.into_response(),
    }
}

pub async fn logout_submit() -> (CookieJar, Redirect) {
    (
        CookieJar::new().add(clear_session_cookie()),
        Redirect::to("/auth/login"),
    )
}
