use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_TAG_NAME_LENGTH: usize = 30;

static HASHTAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w_]*[\p{Alphabetic}_·][\w_]*$").unwrap());

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Strip a leading `#` and check the hashtag grammar.
    pub fn normalize_name(raw: &str) -> Result<String, String> {
        let name = raw.trim();
        let name = name.strip_prefix('#').unwrap_or(name);

        if name.is_empty() {
            return Err("Tag name can't be blank".to_string());
        }
        if name.chars().count() > MAX_TAG_NAME_LENGTH {
            return Err(format!(
                "Tag name is too long (maximum is {MAX_TAG_NAME_LENGTH} characters)"
            ));
        }
        if !HASHTAG_NAME_RE.is_match(name) {
            return Err(format!("Tag name '{name}' is invalid"));
        }

        Ok(name.to_string())
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct FeaturedTag {
    pub id: Uuid,
    pub account_id: Uuid,
    pub tag_id: Uuid,
    pub name: String,
    pub statuses_count: i64,
    pub last_status_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
