use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A moderation complaint filed by one account against another.
///
/// `action_taken_at` and `action_taken_by_account_id` are set and cleared
/// together; the table carries a CHECK constraint for the same pairing.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub account_id: Uuid,
    pub target_account_id: Uuid,
    pub comment: String,
    pub action_taken_at: Option<DateTime<Utc>>,
    pub action_taken_by_account_id: Option<Uuid>,
    pub assigned_account_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn action_taken(&self) -> bool {
        self.action_taken_at.is_some()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_account_id.is_some()
    }
}
