//! Actions representing side effects to be executed by the runtime driver.
//!
//! This module defines the [`Action`] type, the imperative commands produced
//! by the event handler after processing a user intent or an async
//! completion. Actions bridge pure state transformations and effectful
//! operations: service fetches, mutation submissions, debounce timers, and
//! navigation parameter publication.
//!
//! The event handler returns a `Vec<Action>` per event; the runtime driver
//! executes them in sequence and feeds the resulting completions back in as
//! new events.

use crate::domain::{ApplicationId, ApplicationStatus, Job, JobId};
use crate::query::QueryRequest;
use crate::service::JobStatusChange;

use super::modes::NavigationParams;

/// Which of the two query pipelines an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Jobs,
    Applications,
}

/// Commands representing side effects to be executed by the runtime driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Routes a raw jobs-search keystroke through the jobs debounce gate.
    ///
    /// The settled value comes back as a `JobsSearchSettled` event; only
    /// then does a fetch happen.
    DebounceJobsSearch(String),

    /// Routes a raw applications-search keystroke through the applications
    /// debounce gate.
    ///
    /// Tagged with the job the view is scoped to at keystroke time, so a
    /// value that settles (or is already queued) after the view re-scopes
    /// to a different job is recognized as stale and dropped.
    DebounceApplicationsSearch { job_id: JobId, term: String },

    /// Aborts a pending debounce timer, e.g. when the view it belonged to is
    /// torn down. No settled value is emitted afterwards.
    CancelSearchDebounce(PipelineKind),

    /// Executes one jobs fetch for the given sequenced request.
    FetchJobs(QueryRequest<Job>),

    /// Executes one applications fetch, scoped to a job, for the given
    /// sequenced request.
    FetchApplications {
        job_id: JobId,
        request: QueryRequest<crate::domain::Application>,
    },

    /// Submits a confirmed job status mutation to the Action Service.
    SubmitJobStatus {
        job_id: JobId,
        change: JobStatusChange,
    },

    /// Submits a confirmed application status mutation to the Action
    /// Service.
    SubmitApplicationStatus {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },

    /// Publishes the externally visible navigation parameters (written on
    /// every detail/applications entry, cleared on return to the list).
    SyncNavigation(NavigationParams),

    /// Asks the host to download an applicant's CV artifact. Forwarded
    /// verbatim; the controller performs no transfer itself.
    DownloadCv { application_id: ApplicationId },
}
