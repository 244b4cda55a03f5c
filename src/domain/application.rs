//! Application domain model and status transition rules.
//!
//! An [`Application`] links one applicant to one job and carries an embedded
//! CV summary so list views never need a second fetch. Applications cannot
//! outlive their job: when a job is deleted the Collection Service cascades,
//! which this controller observes only as the entities disappearing from
//! freshly fetched pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::job::JobId;

/// Identifier of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the applicant account behind an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub i64);

/// Review status of an application.
///
/// The workflow table encoded by [`ApplicationStatus::can_transition_to`]:
/// `Pending` may move to any other status; `Shortlisted`, `Interviewed` and
/// `Viewed` may move laterally among `{Shortlisted, Interviewed, Hired,
/// Rejected}`; `Hired` and `Rejected` are verdicts and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at.
    Pending,
    /// Opened by the employer but not otherwise acted on.
    Viewed,
    /// Marked as a promising candidate.
    Shortlisted,
    /// Interview scheduled or completed.
    Interviewed,
    /// Offer made and accepted.
    Hired,
    /// Declined.
    Rejected,
}

impl ApplicationStatus {
    /// Returns whether this workflow may move an application from `self` to
    /// `target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        use ApplicationStatus::{Hired, Interviewed, Pending, Rejected, Shortlisted, Viewed};

        if self == target {
            return false;
        }
        match self {
            Pending => true,
            // Viewed is a read receipt, not a verdict: it can still progress.
            Viewed | Shortlisted | Interviewed => {
                matches!(target, Shortlisted | Interviewed | Hired | Rejected)
            }
            Hired | Rejected => false,
        }
    }

    /// Returns `true` when no transition out of this status is offered.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }

    /// Wire value used in Collection Service status filters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Viewed => "viewed",
            Self::Shortlisted => "shortlisted",
            Self::Interviewed => "interviewed",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

/// Embedded summary of an applicant's CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvSummary {
    pub skills: Vec<String>,
    pub experience_years: u8,
}

/// One applicant's application to one job, as reported by the Collection
/// Service. Read-only from the controller's perspective except for status,
/// which moves through the Action Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_id: ApplicantId,
    pub applicant_name: String,
    pub status: ApplicationStatus,
    pub cv: CvSummary,
    pub created_at: DateTime<Utc>,
}

/// Sort keys the Collection Service accepts for application listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSortField {
    /// Submission date (the default, newest first).
    CreatedAt,
    /// Years of experience from the CV summary.
    Experience,
}

impl ApplicationSortField {
    /// Wire value for the `sortBy` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Experience => "experience_years",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_move_anywhere() {
        for to in [
            ApplicationStatus::Viewed,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interviewed,
            ApplicationStatus::Hired,
            ApplicationStatus::Rejected,
        ] {
            assert!(ApplicationStatus::Pending.can_transition_to(to), "{to:?}");
        }
    }

    #[test]
    fn lateral_moves_are_allowed_between_review_states() {
        assert!(ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Interviewed));
        assert!(ApplicationStatus::Interviewed.can_transition_to(ApplicationStatus::Hired));
        assert!(ApplicationStatus::Interviewed.can_transition_to(ApplicationStatus::Rejected));
        assert!(ApplicationStatus::Viewed.can_transition_to(ApplicationStatus::Shortlisted));
    }

    #[test]
    fn verdicts_are_terminal() {
        for from in [ApplicationStatus::Hired, ApplicationStatus::Rejected] {
            for to in [
                ApplicationStatus::Pending,
                ApplicationStatus::Viewed,
                ApplicationStatus::Shortlisted,
                ApplicationStatus::Interviewed,
                ApplicationStatus::Hired,
                ApplicationStatus::Rejected,
            ] {
                assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
            }
            assert!(from.is_terminal());
        }
    }

    #[test]
    fn no_path_back_to_pending() {
        assert!(!ApplicationStatus::Shortlisted.can_transition_to(ApplicationStatus::Pending));
        assert!(!ApplicationStatus::Viewed.can_transition_to(ApplicationStatus::Pending));
    }
}
