use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, Redirect};
use bytes::Bytes;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{FeaturedTag, Tag};
use crate::params::{self, Params};
use crate::state::SharedState;

use super::current_username;

pub const MAX_FEATURED_TAGS: i64 = 10;

#[derive(Template)]
#[template(path = "settings/featured_tags.html")]
struct FeaturedTagsTemplate {
    username: String,
    featured_tags: Vec<FeaturedTag>,
    can_add: bool,
    limit: i64,
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Html<String>, AppError> {
    let featured_tags = db::featured_tags::list_by_account(&state.pool, auth.account_id).await?;

    let template = FeaturedTagsTemplate {
        username: current_username(&state, &auth).await?,
        can_add: (featured_tags.len() as i64) < MAX_FEATURED_TAGS,
        featured_tags,
        limit: MAX_FEATURED_TAGS,
    };
    Ok(Html(template.render()?))
}

/// Decode form or JSON bodies into the same parameter tree.
fn parse_params(headers: &HeaderMap, body: &[u8]) -> Result<Params, String> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/x-www-form-urlencoded");

    if content_type.contains("application/json") {
        match serde_json::from_slice(body) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(_) => Err("Request body must be a JSON object".to_string()),
            Err(e) => Err(format!("Invalid JSON: {e}")),
        }
    } else if content_type.contains("application/x-www-form-urlencoded") {
        params::parse_form(body)
    } else {
        Err(format!("Unsupported content type: {content_type}"))
    }
}

/// `POST /settings/featured_tags` with `featured_tag[name]=...`.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Redirect, AppError> {
    let params = parse_params(&headers, &body).map_err(AppError::BadRequest)?;
    let featured_tag = params::require_object(&params, "featured_tag").map_err(AppError::BadRequest)?;
    let raw_name = params::string_field(featured_tag, "name")
        .map_err(AppError::BadRequest)?
        .ok_or_else(|| AppError::BadRequest("featured_tag[name] is required".to_string()))?;
    let name = Tag::normalize_name(raw_name).map_err(AppError::BadRequest)?;

    let mut tx = state.pool.begin().await?;

    // Serializes concurrent additions for one account so the limit holds.
    sqlx::query("SELECT id FROM accounts WHERE id = $1 FOR UPDATE")
        .bind(auth.account_id)
        .execute(&mut *tx)
        .await?;

    if db::featured_tags::count_by_account(&mut *tx, auth.account_id).await? >= MAX_FEATURED_TAGS {
        return Err(AppError::BadRequest(format!(
            "You can only feature up to {MAX_FEATURED_TAGS} hashtags"
        )));
    }

    let tag = db::tags::find_or_create(&mut *tx, &name).await?;
    let featured = db::featured_tags::create(&mut *tx, auth.account_id, tag.id, &tag.name)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("#{} is already featured", tag.name))
            }
            _ => AppError::Database(e),
        })?;

    tx.commit().await?;

    tracing::info!(account_id = %auth.account_id, featured_tag_id = %featured.id, tag = %featured.name, "Featured tag added");
    Ok(Redirect::to("/settings/featured_tags"))
}

pub async fn destroy(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    if !db::featured_tags::delete_scoped(&state.pool, id, auth.account_id).await? {
        return Err(AppError::NotFound("Featured tag not found".to_string()));
    }

    tracing::info!(account_id = %auth.account_id, featured_tag_id = %id, "Featured tag removed");
    Ok(Redirect::to("/settings/featured_tags"))
}
