//! Job domain model and status transition rules.
//!
//! This module defines the [`Job`] entity as the Collection Service reports it,
//! together with the [`JobStatus`] lifecycle and the transition table the
//! status workflow enforces. Jobs are owned by the employer account; the only
//! field this controller ever mutates (through the Action Service) is the
//! status — everything else is edited through a separate form collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job posting.
///
/// The workflow table encoded by [`JobStatus::can_transition_to`] is:
///
/// ```text
/// Active  ⇄ Paused
/// Active  → Closed          Paused → Closed
/// Draft/Active/Paused/Closed → Deleted
/// ```
///
/// `Closed` and `Deleted` are terminal for this workflow: the controller
/// offers no path back out of either (closing is final; deletion cascades to
/// applications on the service side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created but not yet published; invisible to applicants.
    Draft,
    /// Published and accepting applications.
    Active,
    /// Temporarily hidden from applicants; can be resumed.
    Paused,
    /// Permanently closed to new applications.
    Closed,
    /// Soft-deleted; the Collection Service cascades to applications.
    Deleted,
}

impl JobStatus {
    /// Returns whether this workflow may move a job from `self` to `target`.
    ///
    /// Self-transitions are rejected: re-requesting the current status is a
    /// caller bug, not a no-op.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        use JobStatus::{Active, Closed, Deleted, Paused};

        match (self, target) {
            (Active, Paused) | (Paused, Active) => true,
            (Active | Paused, Closed) => true,
            (Deleted, _) => false,
            (_, Deleted) => true,
            _ => false,
        }
    }

    /// Returns `true` when no transition out of this status is offered.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        // Deleted accepts nothing; Closed only accepts deletion, which is a
        // removal rather than a continuation of the lifecycle.
        matches!(self, Self::Deleted)
    }

    /// Wire value used in Collection Service status filters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
            Self::Deleted => "deleted",
        }
    }
}

/// Employment arrangement advertised by a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

/// Advertised salary band for a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    /// ISO 4217 currency code, e.g. `"USD"`.
    pub currency: String,
    /// Lower bound, in whole currency units.
    pub min: i64,
    /// Upper bound, in whole currency units.
    pub max: i64,
}

/// A job posting as reported by the Collection Service.
///
/// The controller treats jobs as read-only snapshots: entities are created
/// and destroyed by the Collection Service, and status changes go through the
/// Action Service after explicit confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub status: JobStatus,
    pub location: String,
    pub employment_type: EmploymentType,
    pub salary: SalaryRange,
    /// Number of applications received, as counted by the service.
    pub applicant_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Sort keys the Collection Service accepts for job listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSortField {
    /// Posting date (the default, newest first).
    CreatedAt,
    /// Lexicographic job title.
    Title,
    /// Applicant count.
    Applicants,
}

impl JobSortField {
    /// Wire value for the `sortBy` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Title => "title",
            Self::Applicants => "applicant_count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_are_symmetric() {
        assert!(JobStatus::Active.can_transition_to(JobStatus::Paused));
        assert!(JobStatus::Paused.can_transition_to(JobStatus::Active));
    }

    #[test]
    fn closing_is_allowed_from_active_and_paused_only() {
        assert!(JobStatus::Active.can_transition_to(JobStatus::Closed));
        assert!(JobStatus::Paused.can_transition_to(JobStatus::Closed));
        assert!(!JobStatus::Draft.can_transition_to(JobStatus::Closed));
        assert!(!JobStatus::Deleted.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn closed_is_terminal_apart_from_deletion() {
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Active));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Paused));
        assert!(JobStatus::Closed.can_transition_to(JobStatus::Deleted));
    }

    #[test]
    fn anything_but_deleted_can_be_deleted() {
        for from in [
            JobStatus::Draft,
            JobStatus::Active,
            JobStatus::Paused,
            JobStatus::Closed,
        ] {
            assert!(from.can_transition_to(JobStatus::Deleted), "{from:?}");
        }
        assert!(!JobStatus::Deleted.can_transition_to(JobStatus::Deleted));
    }

    #[test]
    fn only_deleted_is_terminal() {
        for from in [
            JobStatus::Draft,
            JobStatus::Active,
            JobStatus::Paused,
            JobStatus::Closed,
        ] {
            assert!(!from.is_terminal(), "{from:?}");
        }
        assert!(JobStatus::Deleted.is_terminal());
    }

    #[test]
    fn self_transitions_are_rejected() {
        assert!(!JobStatus::Active.can_transition_to(JobStatus::Active));
        assert!(!JobStatus::Paused.can_transition_to(JobStatus::Paused));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
    }
}
