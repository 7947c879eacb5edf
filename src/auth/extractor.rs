use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::models::Role;
use crate::state::SharedState;

pub const ACCESS_COOKIE: &str = "access_token";

/// The signed-in user and the account it acts as.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require_moderator(&self) -> Result<(), AppError> {
        if self.role.can_manage_reports() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Moderator access required".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let claims = jwt::decode_token(token, secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            account_id: claims.acc,
            role: claims.role,
        })
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token first, then the session cookie
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return AuthUser::from_token(token, &state.config.jwt_secret);
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(ACCESS_COOKIE) {
            return AuthUser::from_token(cookie.value(), &state.config.jwt_secret);
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}
