//! Confirmation-gated status transition workflow.
//!
//! Every status change in the workspace is irreversible enough to deserve an
//! explicit confirmation step, so mutations run through a small per-action
//! state machine:
//!
//! ```text
//! Idle → Confirming → Submitting → Idle        (confirmed, mutation ok)
//!           │              │
//!           │ cancel       │ mutation failed
//!           ▼              ▼
//!          Idle        Confirming (inline error, dialog stays open)
//! ```
//!
//! The workflow owns exactly one pending transition at a time (the dialog
//! descriptor lives here, not in any global modal registry). Requests outside
//! the allowed transition tables are rejected with an error before any dialog
//! opens. Job deletion additionally requires the user to type a literal
//! confirmation phrase; the mutation is never submitted until that
//! case-sensitive gate is satisfied. State changes are strictly
//! server-confirmed: nothing is altered optimistically while `Submitting`.

use crate::domain::{
    Application, ApplicationId, ApplicationStatus, Error, Job, JobId, JobStatus, Result,
};
use crate::service::JobStatusChange;

/// Phrase the user must type, exactly, to confirm a job deletion.
pub const DELETE_JOB_PHRASE: &str = "delete job";

/// The entity and status move a pending confirmation is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionTarget {
    Job {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
        /// Human-readable reason recorded with the mutation.
        reason: String,
    },
    Application {
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

impl TransitionTarget {
    /// `true` for job moves, `false` for application moves; decides which
    /// pipeline refetches after success.
    #[must_use]
    pub fn is_job(&self) -> bool {
        matches!(self, Self::Job { .. })
    }
}

/// The transition currently awaiting user confirmation, together with the
/// dialog copy the Presentation Layer shows for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    pub target: TransitionTarget,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Whether confirm stays disabled until [`typed`] matches
    /// [`confirmation_phrase`] exactly.
    ///
    /// [`typed`]: PendingTransition::typed
    /// [`confirmation_phrase`]: PendingTransition::confirmation_phrase
    pub requires_typing: bool,
    pub confirmation_phrase: Option<String>,
    /// What the user has typed into the confirmation field so far.
    pub typed: String,
    /// Inline error from a rejected mutation; the dialog stays open.
    pub error: Option<String>,
}

impl PendingTransition {
    /// `true` once the typed-phrase gate (if any) is satisfied.
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        if !self.requires_typing {
            return true;
        }
        self.confirmation_phrase
            .as_deref()
            .is_some_and(|phrase| self.typed == phrase)
    }
}

/// Mutation the driver should run after a confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Job {
        job_id: JobId,
        change: JobStatusChange,
    },
    Application {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },
}

/// Workflow phase, with the pending transition carried in the non-idle
/// phases.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Confirming(PendingTransition),
    Submitting(PendingTransition),
}

/// Gates irreversible status mutations behind explicit confirmation.
#[derive(Debug)]
pub struct TransitionWorkflow {
    phase: Phase,
}

impl Default for TransitionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// The pending transition, whether confirming or submitting.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingTransition> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Confirming(pending) | Phase::Submitting(pending) => Some(pending),
        }
    }

    /// `true` while the mutation is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting(_))
    }

    /// Opens a confirmation dialog for a job status change.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidJobTransition`] when the move is outside the allowed
    /// table, [`Error::Workflow`] when another transition is already pending.
    pub fn request_job(&mut self, job: &Job, to: JobStatus, reason: String) -> Result<()> {
        if !job.status.can_transition_to(to) {
            return Err(Error::InvalidJobTransition {
                from: job.status,
                to,
            });
        }
        self.ensure_idle()?;

        let (title, message, confirm_text) = job_dialog_copy(job, to);
        let requires_typing = to == JobStatus::Deleted;
        self.phase = Phase::Confirming(PendingTransition {
            target: TransitionTarget::Job {
                id: job.id,
                from: job.status,
                to,
                reason,
            },
            title,
            message,
            confirm_text,
            cancel_text: "Cancel".to_string(),
            requires_typing,
            confirmation_phrase: requires_typing.then(|| DELETE_JOB_PHRASE.to_string()),
            typed: String::new(),
            error: None,
        });
        tracing::debug!(job_id = %job.id, from = ?job.status, to = ?to, "job transition pending confirmation");
        Ok(())
    }

    /// Opens a confirmation dialog for an application status change.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidApplicationTransition`] when the move is outside the
    /// allowed table, [`Error::Workflow`] when another transition is already
    /// pending.
    pub fn request_application(
        &mut self,
        application: &Application,
        to: ApplicationStatus,
    ) -> Result<()> {
        if !application.status.can_transition_to(to) {
            return Err(Error::InvalidApplicationTransition {
                from: application.status,
                to,
            });
        }
        self.ensure_idle()?;

        let (title, message, confirm_text) = application_dialog_copy(application, to);
        self.phase = Phase::Confirming(PendingTransition {
            target: TransitionTarget::Application {
                id: application.id,
                from: application.status,
                to,
            },
            title,
            message,
            confirm_text,
            cancel_text: "Cancel".to_string(),
            requires_typing: false,
            confirmation_phrase: None,
            typed: String::new(),
            error: None,
        });
        tracing::debug!(
            application_id = %application.id,
            from = ?application.status,
            to = ?to,
            "application transition pending confirmation"
        );
        Ok(())
    }

    /// Records what the user has typed into the confirmation field. No-op
    /// unless a dialog is open and awaiting confirmation.
    pub fn type_confirmation(&mut self, text: String) {
        if let Phase::Confirming(pending) = &mut self.phase {
            pending.typed = text;
        }
    }

    /// Confirms the pending transition, moving to `Submitting` and returning
    /// the mutation the driver should run.
    ///
    /// # Errors
    ///
    /// [`Error::Workflow`] when nothing is pending, when already submitting,
    /// or when the typed-phrase gate is not satisfied. The phase is left
    /// unchanged in all error cases, so a mismatched phrase never reaches
    /// the Action Service.
    pub fn confirm(&mut self) -> Result<Submission> {
        let Phase::Confirming(pending) = &self.phase else {
            return Err(Error::Workflow("no transition awaiting confirmation".to_string()));
        };
        if !pending.confirm_enabled() {
            return Err(Error::Workflow(
                "confirmation phrase does not match".to_string(),
            ));
        }

        let submission = match &pending.target {
            TransitionTarget::Job { id, to, reason, .. } => Submission::Job {
                job_id: *id,
                change: JobStatusChange {
                    status: *to,
                    reason: reason.clone(),
                },
            },
            TransitionTarget::Application { id, to, .. } => Submission::Application {
                application_id: *id,
                status: *to,
            },
        };

        let Phase::Confirming(pending) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            unreachable!("phase checked above");
        };
        self.phase = Phase::Submitting(pending);
        Ok(submission)
    }

    /// Dismisses the dialog without mutating anything. No-op while the
    /// mutation is already in flight.
    pub fn cancel(&mut self) {
        if let Phase::Confirming(_) = self.phase {
            self.phase = Phase::Idle;
        }
    }

    /// Reports that the Action Service accepted the mutation. The dialog
    /// closes; the returned target tells the caller which pipeline to
    /// refetch.
    ///
    /// # Errors
    ///
    /// [`Error::Workflow`] when no mutation was in flight.
    pub fn mutation_succeeded(&mut self) -> Result<TransitionTarget> {
        if !self.is_submitting() {
            return Err(Error::Workflow("no mutation in flight".to_string()));
        }
        let Phase::Submitting(pending) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            unreachable!("phase checked above");
        };
        tracing::debug!(target = ?pending.target, "mutation confirmed by service");
        Ok(pending.target)
    }

    /// Reports that the Action Service rejected the mutation (non-200 or
    /// transport failure). The dialog reopens with the error inline; nothing
    /// retries automatically.
    pub fn mutation_failed(&mut self, message: impl Into<String>) {
        if !self.is_submitting() {
            return;
        }
        if let Phase::Submitting(pending) = std::mem::replace(&mut self.phase, Phase::Idle) {
            let message = message.into();
            tracing::warn!(target = ?pending.target, error = %message, "mutation rejected");
            self.phase = Phase::Confirming(PendingTransition {
                error: Some(message),
                ..pending
            });
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if matches!(self.phase, Phase::Idle) {
            Ok(())
        } else {
            Err(Error::Workflow("a transition is already pending".to_string()))
        }
    }
}

fn job_dialog_copy(job: &Job, to: JobStatus) -> (String, String, String) {
    match to {
        JobStatus::Paused => (
            "Pause Job".to_string(),
            format!("Pause \"{}\"? Applicants will no longer see it.", job.title),
            "Pause".to_string(),
        ),
        JobStatus::Active => (
            "Resume Job".to_string(),
            format!("Resume \"{}\" and make it visible to applicants again?", job.title),
            "Resume".to_string(),
        ),
        JobStatus::Closed => (
            "Close Job".to_string(),
            format!(
                "Close \"{}\"? No further applications will be accepted and the job cannot be reopened.",
                job.title
            ),
            "Close".to_string(),
        ),
        JobStatus::Deleted => (
            "Delete Job".to_string(),
            format!(
                "Permanently delete \"{}\" and all of its applications? Type \"{DELETE_JOB_PHRASE}\" to confirm.",
                job.title
            ),
            "Delete".to_string(),
        ),
        JobStatus::Draft => (
            "Revert Job to Draft".to_string(),
            format!("Move \"{}\" back to draft?", job.title),
            "Revert".to_string(),
        ),
    }
}

fn application_dialog_copy(application: &Application, to: ApplicationStatus) -> (String, String, String) {
    let verb = match to {
        ApplicationStatus::Shortlisted => "Shortlist",
        ApplicationStatus::Interviewed => "Mark as interviewed",
        ApplicationStatus::Hired => "Hire",
        ApplicationStatus::Rejected => "Reject",
        ApplicationStatus::Viewed => "Mark as viewed",
        ApplicationStatus::Pending => "Reset",
    };
    (
        format!("{verb} Applicant"),
        format!("{verb} {}?", application.applicant_name),
        verb.to_string(),
    )
}
