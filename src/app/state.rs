//! Central workspace state container and view model computation.
//!
//! This module defines [`WorkspaceState`], the single source of truth for
//! everything the controller owns: the two query pipelines (jobs, and
//! applications of the selected job), the view machine, and the transition
//! workflow. It is mutated exclusively by the event handler and read by the
//! Presentation Layer through computed view models.
//!
//! # State Components
//!
//! - **Jobs pipeline**: paginated/filtered/sorted job listing
//! - **Applications pipeline**: same, scoped to the selected job
//! - **View machine**: which of the three views is showing, and for which job
//! - **Workflow**: the confirmation dialog for an in-flight status change
//! - **Selected-job snapshot**: the job the detail view renders, captured when
//!   selected and refreshed from every committed jobs page
//!
//! The two pipelines never share mutable state; the selected job id is owned
//! by the view machine and only read here.

use crate::domain::{Application, Job, JobId};
use crate::query::QueryPipeline;
use crate::ui::viewmodel::{CollectionViewModel, DialogViewModel, WorkspaceViewModel};
use crate::Config;

use super::modes::{ViewMode, ViewState};
use super::workflow::TransitionWorkflow;

/// Central state container for the workspace controller.
#[derive(Debug)]
pub struct WorkspaceState {
    /// Pipeline behind the jobs list.
    pub jobs: QueryPipeline<Job>,

    /// Pipeline behind the applications view. Reset whenever the view is
    /// scoped to a different job so no filter, sort, or page leaks across
    /// jobs.
    pub applications: QueryPipeline<Application>,

    /// View machine; exclusive owner of the selected job id.
    pub view: ViewState,

    /// Status transition workflow and its (single) confirmation dialog.
    pub workflow: TransitionWorkflow,

    /// Snapshot of the selected job, captured when the detail view opens and
    /// refreshed from each committed jobs page. Cleared when the job
    /// disappears from a fresh page and the view falls back to the list.
    pub selected_job: Option<Job>,
}

impl WorkspaceState {
    /// Creates state with default specs and the initial `JobsList` view.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            jobs: QueryPipeline::new("jobs", config.jobs_page_size),
            applications: QueryPipeline::new("applications", config.applications_page_size),
            view: ViewState::new(),
            workflow: TransitionWorkflow::new(),
            selected_job: None,
        }
    }

    /// Like [`new`], but starting from a restored view machine (reload or
    /// shared link).
    ///
    /// [`new`]: WorkspaceState::new
    #[must_use]
    pub fn with_view(config: &Config, view: ViewState) -> Self {
        Self {
            view,
            ..Self::new(config)
        }
    }

    /// Looks a job up by id, preferring the selected-job snapshot over the
    /// committed page.
    #[must_use]
    pub fn find_job(&self, id: JobId) -> Option<&Job> {
        self.selected_job
            .as_ref()
            .filter(|job| job.id == id)
            .or_else(|| self.jobs.current_page().items.iter().find(|job| job.id == id))
    }

    /// Looks an application up on the committed applications page.
    #[must_use]
    pub fn find_application(&self, id: crate::domain::ApplicationId) -> Option<&Application> {
        self.applications
            .current_page()
            .items
            .iter()
            .find(|application| application.id == id)
    }

    /// Reconciles the selected-job snapshot with a freshly committed jobs
    /// page. Returns `true` when the selection vanished and the view fell
    /// back to the jobs list (the caller then re-publishes navigation
    /// parameters).
    pub fn refresh_selection(&mut self) -> bool {
        let Some(selected) = self.view.selected_job_id() else {
            return false;
        };
        if self.view.mode() == ViewMode::JobsList {
            return false;
        }

        let page = self.jobs.current_page();
        if let Some(fresh) = page.items.iter().find(|job| job.id == selected) {
            self.selected_job = Some(fresh.clone());
            return false;
        }

        let fell_back = self
            .view
            .drop_missing_selection(page.items.iter().map(|job| job.id));
        if fell_back {
            self.selected_job = None;
        }
        fell_back
    }

    /// Computes the renderable view model for the Presentation Layer.
    ///
    /// View models are immutable snapshots: they carry no behavior, and the
    /// dialog's confirm/close callbacks are represented by the
    /// `ConfirmPending` / `CancelPending` events the host sends back.
    #[must_use]
    pub fn compute_viewmodel(&self) -> WorkspaceViewModel {
        let applications = match self.view.mode() {
            ViewMode::ApplicationsOfJob => Some(CollectionViewModel::from_pipeline(&self.applications)),
            ViewMode::JobsList | ViewMode::JobDetail => None,
        };

        WorkspaceViewModel {
            mode: self.view.mode(),
            selected_job_id: self.view.selected_job_id(),
            selected_job: self.selected_job.clone(),
            jobs: CollectionViewModel::from_pipeline(&self.jobs),
            applications,
            dialog: DialogViewModel::from_workflow(&self.workflow),
            navigation: self.view.params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmploymentType, JobStatus, SalaryRange};

    fn job(id: i64) -> Job {
        Job {
            id: JobId(id),
            title: format!("Job {id}"),
            status: JobStatus::Active,
            location: "Remote".to_string(),
            employment_type: EmploymentType::Contract,
            salary: SalaryRange {
                currency: "USD".to_string(),
                min: 10,
                max: 20,
            },
            applicant_count: 0,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn selection_snapshot_refreshes_from_committed_page() {
        let config = Config::default();
        let mut state = WorkspaceState::new(&config);

        let req = state.jobs.refetch();
        state
            .jobs
            .commit_success(req.seq, vec![job(1), job(2)], 2, 1);
        state.view.open_job_detail(JobId(2));
        state.selected_job = state.find_job(JobId(2)).cloned();

        // The job changes server-side; a refetch brings the new title.
        let req = state.jobs.refetch();
        let mut updated = job(2);
        updated.title = "Renamed".to_string();
        state.jobs.commit_success(req.seq, vec![job(1), updated], 2, 1);

        assert!(!state.refresh_selection());
        assert_eq!(state.selected_job.as_ref().unwrap().title, "Renamed");
    }

    #[test]
    fn vanished_selection_falls_back_to_list() {
        let config = Config::default();
        let mut state = WorkspaceState::new(&config);

        let req = state.jobs.refetch();
        state.jobs.commit_success(req.seq, vec![job(5)], 1, 1);
        state.view.open_job_detail(JobId(5));
        state.selected_job = state.find_job(JobId(5)).cloned();

        // Job 5 deleted; the fresh page no longer carries it.
        let req = state.jobs.refetch();
        state.jobs.commit_success(req.seq, vec![job(6)], 1, 1);

        assert!(state.refresh_selection());
        assert_eq!(state.view.mode(), ViewMode::JobsList);
        assert!(state.selected_job.is_none());
    }

    #[test]
    fn viewmodel_exposes_applications_only_in_that_mode() {
        let config = Config::default();
        let mut state = WorkspaceState::new(&config);
        assert!(state.compute_viewmodel().applications.is_none());

        state.view.open_job_detail(JobId(1));
        state.view.open_applications(JobId(1));
        assert!(state.compute_viewmodel().applications.is_some());
    }
}
