//! Event handling and state transition logic — the action dispatcher.
//!
//! This module implements the core event handler that processes user intents
//! from the Presentation Layer and async completions from the runtime driver,
//! translating them into state changes and side-effect actions. It is the
//! primary control flow coordinator for the workspace.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host UI or from the runtime driver
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`WorkspaceState`] and its components
//! 4. Actions are collected and returned for the driver to execute
//!
//! Each user intent performs exactly one of: a view machine transition, a
//! query pipeline parameter change, or a transition-workflow phase change.
//! Fetch de-duplication is structural: pipelines return one sequenced
//! request per spec change, and completions are dropped at commit time when
//! their sequence has been superseded.

use crate::domain::{
    ApplicationId, ApplicationSortField, ApplicationStatus, Error, JobId, JobSortField, JobStatus,
    Result,
};
use crate::query::{CommitOutcome, StatusFilter};
use crate::service::PageMeta;

use super::actions::{Action, PipelineKind};
use super::modes::ViewMode;
use super::state::WorkspaceState;
use super::workflow::Submission;

/// Events triggered by user intents or async completions.
///
/// User intents come from the Presentation Layer; completions are fed back
/// by the runtime driver when timers settle, fetches resolve, or mutations
/// finish. The handler processes them sequentially, so state transitions are
/// deterministic for a given event order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Controller start: fetch the jobs list, and the applications of the
    /// restored job when initialization restored `ApplicationsOfJob` mode.
    Started,

    /// Opens a job's detail view.
    ViewJob(JobId),
    /// Opens a job's applications view. Resets the applications pipeline to
    /// defaults before fetching, so nothing leaks from a previous job.
    ViewApplications(JobId),
    /// Returns to the jobs list.
    BackToList,

    /// Raw jobs-search keystroke; routed through the debounce gate.
    JobsSearchInput(String),
    /// Jobs status filter change (intentional, fetches immediately).
    FilterJobsByStatus(StatusFilter<JobStatus>),
    /// Jobs sort header click; repeat clicks on the active field flip the
    /// direction.
    SortJobs(JobSortField),
    /// Jobs pagination control.
    GoToJobsPage(u32),
    /// Manual retry after a jobs fetch failure.
    RetryJobsFetch,

    /// Raw applications-search keystroke; routed through the debounce gate.
    ApplicationsSearchInput(String),
    /// Applications status filter change.
    FilterApplicationsByStatus(StatusFilter<ApplicationStatus>),
    /// Applications sort header click.
    SortApplications(ApplicationSortField),
    /// Applications pagination control.
    GoToApplicationsPage(u32),
    /// Manual retry after an applications fetch failure.
    RetryApplicationsFetch,

    /// Opens the confirmation dialog for a job status change.
    RequestJobStatusChange {
        job_id: JobId,
        to: JobStatus,
        /// Human-readable reason recorded with the mutation.
        reason: String,
    },
    /// Opens the confirmation dialog for an application status change.
    RequestApplicationStatusChange {
        application_id: ApplicationId,
        to: ApplicationStatus,
    },
    /// Updates the typed text in a typing-gated confirmation dialog.
    TypeConfirmation(String),
    /// Confirms the pending transition and submits the mutation.
    ConfirmPending,
    /// Dismisses the pending transition without mutating anything.
    CancelPending,

    /// Asks the host to download an applicant's CV.
    DownloadCv(ApplicationId),

    /// A jobs search burst settled in the debounce gate.
    JobsSearchSettled(String),
    /// An applications search burst settled in the debounce gate.
    ///
    /// Carries the job the term was typed under: a settled value already
    /// queued when the view re-scopes to a different job must not be
    /// applied to the new job's freshly reset pipeline.
    ApplicationsSearchSettled { job_id: JobId, term: String },
    /// A jobs fetch resolved successfully.
    JobsPageLoaded {
        seq: u64,
        data: Vec<crate::domain::Job>,
        meta: PageMeta,
    },
    /// A jobs fetch failed.
    JobsFetchFailed { seq: u64, message: String },
    /// An applications fetch resolved successfully.
    ApplicationsPageLoaded {
        seq: u64,
        job_id: JobId,
        data: Vec<crate::domain::Application>,
        meta: PageMeta,
    },
    /// An applications fetch failed.
    ApplicationsFetchFailed { seq: u64, message: String },
    /// The Action Service accepted the submitted mutation.
    MutationSucceeded,
    /// The Action Service rejected the submitted mutation (non-200 status
    /// or transport failure).
    MutationFailed(String),
}

/// Processes an event, mutates workspace state, and returns actions to
/// execute.
///
/// Returns `(render, actions)`: `render` tells the host whether visible
/// state changed, `actions` are the side effects for the driver, in order.
///
/// # Errors
///
/// Programming-contract violations only: a status move outside the allowed
/// tables ([`Error::InvalidJobTransition`],
/// [`Error::InvalidApplicationTransition`]) or a workflow request while
/// another transition is pending. Runtime failures (fetch/mutation errors)
/// are events, not `Err`s, and degrade into visible retryable state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut WorkspaceState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?discriminant_name(event)).entered();

    match event {
        Event::Started => {
            let mut actions = vec![Action::FetchJobs(state.jobs.refetch())];
            if state.view.mode() == ViewMode::ApplicationsOfJob {
                if let Some(job_id) = state.view.selected_job_id() {
                    actions.push(Action::FetchApplications {
                        job_id,
                        request: state.applications.reset(),
                    });
                }
            }
            Ok((true, actions))
        }

        Event::ViewJob(job_id) => {
            state.view.open_job_detail(*job_id);
            state.selected_job = state.find_job(*job_id).cloned();
            tracing::debug!(job_id = %job_id, "opened job detail");
            Ok((true, vec![Action::SyncNavigation(state.view.params())]))
        }

        Event::ViewApplications(job_id) => {
            if !state.view.open_applications(*job_id) {
                tracing::debug!(job_id = %job_id, mode = ?state.view.mode(), "applications view not reachable from here");
                return Ok((false, vec![]));
            }
            state.selected_job = state.find_job(*job_id).cloned();
            // Fresh scope: defaults first, then exactly one fetch for the
            // new job. A gate still settling for the old scope must not
            // fire into it.
            let request = state.applications.reset();
            tracing::debug!(job_id = %job_id, "opened applications view");
            Ok((
                true,
                vec![
                    Action::CancelSearchDebounce(PipelineKind::Applications),
                    Action::SyncNavigation(state.view.params()),
                    Action::FetchApplications {
                        job_id: *job_id,
                        request,
                    },
                ],
            ))
        }

        Event::BackToList => {
            state.view.back_to_list();
            state.selected_job = None;
            Ok((
                true,
                vec![
                    Action::CancelSearchDebounce(PipelineKind::Applications),
                    Action::SyncNavigation(state.view.params()),
                ],
            ))
        }

        Event::JobsSearchInput(term) => Ok((
            false,
            vec![Action::DebounceJobsSearch(term.clone())],
        )),

        Event::ApplicationsSearchInput(term) => match applications_scope(state) {
            Some(job_id) => Ok((
                false,
                vec![Action::DebounceApplicationsSearch {
                    job_id,
                    term: term.clone(),
                }],
            )),
            None => Ok((false, vec![])),
        },

        Event::JobsSearchSettled(term) => Ok((
            true,
            vec![Action::FetchJobs(state.jobs.set_search(term.clone()))],
        )),

        Event::ApplicationsSearchSettled { job_id, term } => {
            // Scope check covers both teardown and re-scope: a value that
            // settled for a previous job (or is already queued when the
            // view switches) never reaches the new job's pipeline.
            match applications_scope(state) {
                Some(current) if current == *job_id => Ok((
                    true,
                    vec![Action::FetchApplications {
                        job_id: current,
                        request: state.applications.set_search(term.clone()),
                    }],
                )),
                _ => {
                    tracing::debug!(job_id = %job_id, "dropping settled term for a stale scope");
                    Ok((false, vec![]))
                }
            }
        }

        Event::FilterJobsByStatus(filter) => Ok((
            true,
            vec![Action::FetchJobs(state.jobs.set_status_filter(*filter))],
        )),

        Event::SortJobs(field) => Ok((
            true,
            vec![Action::FetchJobs(state.jobs.toggle_sort(*field))],
        )),

        Event::GoToJobsPage(page) => Ok((
            true,
            vec![Action::FetchJobs(state.jobs.set_page(*page))],
        )),

        Event::RetryJobsFetch => Ok((true, vec![Action::FetchJobs(state.jobs.retry())])),

        Event::FilterApplicationsByStatus(filter) => {
            with_applications_scope(state, |state, job_id| Action::FetchApplications {
                job_id,
                request: state.applications.set_status_filter(*filter),
            })
        }

        Event::SortApplications(field) => {
            with_applications_scope(state, |state, job_id| Action::FetchApplications {
                job_id,
                request: state.applications.toggle_sort(*field),
            })
        }

        Event::GoToApplicationsPage(page) => {
            with_applications_scope(state, |state, job_id| Action::FetchApplications {
                job_id,
                request: state.applications.set_page(*page),
            })
        }

        Event::RetryApplicationsFetch => {
            with_applications_scope(state, |state, job_id| Action::FetchApplications {
                job_id,
                request: state.applications.retry(),
            })
        }

        Event::RequestJobStatusChange { job_id, to, reason } => {
            let Some(job) = state.find_job(*job_id).cloned() else {
                tracing::warn!(job_id = %job_id, "status change requested for unknown job");
                return Ok((false, vec![]));
            };
            state.workflow.request_job(&job, *to, reason.clone())?;
            Ok((true, vec![]))
        }

        Event::RequestApplicationStatusChange { application_id, to } => {
            let Some(application) = state.find_application(*application_id).cloned() else {
                tracing::warn!(application_id = %application_id, "status change requested for unknown application");
                return Ok((false, vec![]));
            };
            state.workflow.request_application(&application, *to)?;
            Ok((true, vec![]))
        }

        Event::TypeConfirmation(text) => {
            state.workflow.type_confirmation(text.clone());
            Ok((true, vec![]))
        }

        Event::ConfirmPending => match state.workflow.confirm() {
            Ok(Submission::Job { job_id, change }) => Ok((
                true,
                vec![Action::SubmitJobStatus {
                    job_id,
                    change,
                }],
            )),
            Ok(Submission::Application {
                application_id,
                status,
            }) => Ok((
                true,
                vec![Action::SubmitApplicationStatus {
                    application_id,
                    status,
                }],
            )),
            // Confirm raced ahead of the typing gate or arrived with no
            // dialog open; the mutation must not run either way.
            Err(Error::Workflow(reason)) => {
                tracing::debug!(reason = %reason, "confirm ignored");
                Ok((false, vec![]))
            }
            Err(error) => Err(error),
        },

        Event::CancelPending => {
            state.workflow.cancel();
            Ok((true, vec![]))
        }

        Event::DownloadCv(application_id) => Ok((
            false,
            vec![Action::DownloadCv {
                application_id: *application_id,
            }],
        )),

        Event::JobsPageLoaded { seq, data, meta } => {
            let outcome =
                state
                    .jobs
                    .commit_success(*seq, data.clone(), meta.total, meta.total_pages);
            match outcome {
                CommitOutcome::Stale => Ok((false, vec![])),
                CommitOutcome::Applied => {
                    let mut actions = vec![];
                    if state.refresh_selection() {
                        actions.push(Action::SyncNavigation(state.view.params()));
                    }
                    Ok((true, actions))
                }
                CommitOutcome::Refetch(request) => {
                    let mut actions = vec![];
                    if state.refresh_selection() {
                        actions.push(Action::SyncNavigation(state.view.params()));
                    }
                    actions.push(Action::FetchJobs(request));
                    Ok((true, actions))
                }
            }
        }

        Event::JobsFetchFailed { seq, message } => {
            match state.jobs.commit_failure(*seq, message.clone()) {
                CommitOutcome::Stale => Ok((false, vec![])),
                _ => Ok((true, vec![])),
            }
        }

        Event::ApplicationsPageLoaded {
            seq,
            job_id,
            data,
            meta,
        } => {
            // A response for a previously selected job also fails the
            // sequence check, since re-scoping reset the pipeline.
            let outcome = state.applications.commit_success(
                *seq,
                data.clone(),
                meta.total,
                meta.total_pages,
            );
            match outcome {
                CommitOutcome::Stale => Ok((false, vec![])),
                CommitOutcome::Applied => Ok((true, vec![])),
                CommitOutcome::Refetch(request) => Ok((
                    true,
                    vec![Action::FetchApplications {
                        job_id: *job_id,
                        request,
                    }],
                )),
            }
        }

        Event::ApplicationsFetchFailed { seq, message } => {
            match state.applications.commit_failure(*seq, message.clone()) {
                CommitOutcome::Stale => Ok((false, vec![])),
                _ => Ok((true, vec![])),
            }
        }

        Event::MutationSucceeded => {
            let target = state.workflow.mutation_succeeded()?;
            let action = if target.is_job() {
                Action::FetchJobs(state.jobs.refetch())
            } else {
                match state.view.selected_job_id() {
                    Some(job_id) => Action::FetchApplications {
                        job_id,
                        request: state.applications.refetch(),
                    },
                    None => return Ok((true, vec![])),
                }
            };
            Ok((true, vec![action]))
        }

        Event::MutationFailed(message) => {
            state.workflow.mutation_failed(message.clone());
            Ok((true, vec![]))
        }
    }
}

/// Runs an applications-pipeline change only while a job is selected; the
/// intents are meaningless (and impossible to scope) outside that view.
/// The job the applications view is currently scoped to, if it is open.
fn applications_scope(state: &WorkspaceState) -> Option<JobId> {
    match (state.view.mode(), state.view.selected_job_id()) {
        (ViewMode::ApplicationsOfJob, Some(job_id)) => Some(job_id),
        _ => None,
    }
}

fn with_applications_scope(
    state: &mut WorkspaceState,
    change: impl FnOnce(&mut WorkspaceState, JobId) -> Action,
) -> Result<(bool, Vec<Action>)> {
    match applications_scope(state) {
        Some(job_id) => {
            let action = change(state, job_id);
            Ok((true, vec![action]))
        }
        None => {
            tracing::debug!("applications intent ignored outside the applications view");
            Ok((false, vec![]))
        }
    }
}

fn discriminant_name(event: &Event) -> &'static str {
    match event {
        Event::Started => "Started",
        Event::ViewJob(_) => "ViewJob",
        Event::ViewApplications(_) => "ViewApplications",
        Event::BackToList => "BackToList",
        Event::JobsSearchInput(_) => "JobsSearchInput",
        Event::FilterJobsByStatus(_) => "FilterJobsByStatus",
        Event::SortJobs(_) => "SortJobs",
        Event::GoToJobsPage(_) => "GoToJobsPage",
        Event::RetryJobsFetch => "RetryJobsFetch",
        Event::ApplicationsSearchInput(_) => "ApplicationsSearchInput",
        Event::FilterApplicationsByStatus(_) => "FilterApplicationsByStatus",
        Event::SortApplications(_) => "SortApplications",
        Event::GoToApplicationsPage(_) => "GoToApplicationsPage",
        Event::RetryApplicationsFetch => "RetryApplicationsFetch",
        Event::RequestJobStatusChange { .. } => "RequestJobStatusChange",
        Event::RequestApplicationStatusChange { .. } => "RequestApplicationStatusChange",
        Event::TypeConfirmation(_) => "TypeConfirmation",
        Event::ConfirmPending => "ConfirmPending",
        Event::CancelPending => "CancelPending",
        Event::DownloadCv(_) => "DownloadCv",
        Event::JobsSearchSettled(_) => "JobsSearchSettled",
        Event::ApplicationsSearchSettled { .. } => "ApplicationsSearchSettled",
        Event::JobsPageLoaded { .. } => "JobsPageLoaded",
        Event::JobsFetchFailed { .. } => "JobsFetchFailed",
        Event::ApplicationsPageLoaded { .. } => "ApplicationsPageLoaded",
        Event::ApplicationsFetchFailed { .. } => "ApplicationsFetchFailed",
        Event::MutationSucceeded => "MutationSucceeded",
        Event::MutationFailed(_) => "MutationFailed",
    }
}
