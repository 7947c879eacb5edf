//! Report lifecycle transitions.
//!
//! A report is `Open` while `action_taken_at` is null and `Resolved` otherwise;
//! assignment is an independent axis. Every transition is total over report
//! states and is committed together with exactly one admin action log row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::{ActionKind, Report};

pub const REPORT_TARGET_TYPE: &str = "Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Resolve,
    Reopen,
    AssignToSelf,
    Unassign,
}

impl ReportAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ReportAction::Resolve => ActionKind::Resolve,
            ReportAction::Reopen => ActionKind::Reopen,
            ReportAction::AssignToSelf => ActionKind::Assign,
            ReportAction::Unassign => ActionKind::Unassign,
        }
    }

    /// Path segment used by the admin routes.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "resolve" => Some(ReportAction::Resolve),
            "reopen" => Some(ReportAction::Reopen),
            "assign_to_self" => Some(ReportAction::AssignToSelf),
            "unassign" => Some(ReportAction::Unassign),
            _ => None,
        }
    }

    /// Apply the transition in memory. Re-resolving overwrites the resolver.
    pub fn apply(&self, report: &mut Report, actor: Uuid, now: DateTime<Utc>) {
        match self {
            ReportAction::Resolve => {
                report.action_taken_at = Some(now);
                report.action_taken_by_account_id = Some(actor);
            }
            ReportAction::Reopen => {
                report.action_taken_at = None;
                report.action_taken_by_account_id = None;
            }
            ReportAction::AssignToSelf => {
                report.assigned_account_id = Some(actor);
            }
            ReportAction::Unassign => {
                report.assigned_account_id = None;
            }
        }
    }
}

#[derive(Clone)]
pub struct ReportLifecycle {
    pool: PgPool,
}

impl ReportLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resolve(&self, report_id: Uuid, actor: Uuid) -> Result<Report, AppError> {
        self.perform(report_id, actor, ReportAction::Resolve).await
    }

    pub async fn reopen(&self, report_id: Uuid, actor: Uuid) -> Result<Report, AppError> {
        self.perform(report_id, actor, ReportAction::Reopen).await
    }

    pub async fn assign_to_self(&self, report_id: Uuid, actor: Uuid) -> Result<Report, AppError> {
        self.perform(report_id, actor, ReportAction::AssignToSelf).await
    }

    pub async fn unassign(&self, report_id: Uuid, actor: Uuid) -> Result<Report, AppError> {
        self.perform(report_id, actor, ReportAction::Unassign).await
    }

    /// Lock the report row, apply `action`, write it back and append the
    /// action log, all in one transaction. Dropping `tx` on an early return
    /// rolls everything back.
    pub async fn perform(
        &self,
        report_id: Uuid,
        actor: Uuid,
        action: ReportAction,
    ) -> Result<Report, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut report = db::reports::lock_by_id(&mut *tx, report_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let now = Utc::now();
        action.apply(&mut report, actor, now);

        let report = db::reports::update_state(&mut *tx, &report, now).await?;
        let log = db::action_logs::create(
            &mut *tx,
            actor,
            action.kind(),
            REPORT_TARGET_TYPE,
            report.id,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            report_id = %report.id,
            actor = %actor,
            action = action.kind().as_str(),
            action_log_id = %log.id,
            "Report lifecycle action applied"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_report() -> Report {
        let now = Utc::now();
        Report {
            id: Uuid::now_v7(),
            account_id: Uuid::now_v7(),
            target_account_id: Uuid::now_v7(),
            comment: "First report".to_string(),
            action_taken_at: None,
            action_taken_by_account_id: None,
            assigned_account_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn resolve_sets_resolution_pair() {
        let mut report = open_report();
        let moderator = Uuid::now_v7();
        let now = Utc::now();

        ReportAction::Resolve.apply(&mut report, moderator, now);

        assert!(report.action_taken());
        assert_eq!(report.action_taken_at, Some(now));
        assert_eq!(report.action_taken_by_account_id, Some(moderator));
    }

    #[test]
    fn re_resolving_overwrites_resolver() {
        let mut report = open_report();
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();

        ReportAction::Resolve.apply(&mut report, first, Utc::now());
        let later = Utc::now() + chrono::Duration::minutes(5);
        ReportAction::Resolve.apply(&mut report, second, later);

        assert_eq!(report.action_taken_by_account_id, Some(second));
        assert_eq!(report.action_taken_at, Some(later));
    }

    #[test]
    fn reopen_clears_both_fields_and_is_idempotent() {
        let mut report = open_report();
        ReportAction::Resolve.apply(&mut report, Uuid::now_v7(), Utc::now());

        ReportAction::Reopen.apply(&mut report, Uuid::now_v7(), Utc::now());
        assert!(!report.action_taken());
        assert_eq!(report.action_taken_by_account_id, None);

        ReportAction::Reopen.apply(&mut report, Uuid::now_v7(), Utc::now());
        assert_eq!(report.action_taken_at, None);
        assert_eq!(report.action_taken_by_account_id, None);
    }

    #[test]
    fn assignment_is_independent_of_resolution() {
        let mut report = open_report();
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();

        ReportAction::AssignToSelf.apply(&mut report, first, Utc::now());
        ReportAction::Resolve.apply(&mut report, second, Utc::now());
        assert_eq!(report.assigned_account_id, Some(first));

        ReportAction::AssignToSelf.apply(&mut report, second, Utc::now());
        assert_eq!(report.assigned_account_id, Some(second));

        ReportAction::Unassign.apply(&mut report, second, Utc::now());
        ReportAction::Unassign.apply(&mut report, second, Utc::now());
        assert!(!report.is_assigned());
        assert!(report.action_taken());
    }

    #[test]
    fn path_segments_map_to_log_kinds() {
        assert_eq!(
            ReportAction::parse("assign_to_self").map(|a| a.kind()),
            Some(ActionKind::Assign)
        );
        assert_eq!(
            ReportAction::parse("unassign").map(|a| a.kind()),
            Some(ActionKind::Unassign)
        );
        assert_eq!(ReportAction::parse("delete"), None);
    }
}
