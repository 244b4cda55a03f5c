//! View mode state machine and navigation parameter mapping.
//!
//! This module defines the three-mode view machine that decides what the
//! workspace is showing (the jobs list, one job's detail, or one job's
//! applications) and the bidirectional mapping between that machine and the
//! externally visible navigation parameters, so a reload or a shared link
//! reproduces the same view.
//!
//! # State Machine
//!
//! ```text
//! JobsList ⇄ JobDetail ⇄ ApplicationsOfJob
//!     ↑                          │
//!     └───────── back ───────────┘
//! ```
//!
//! Navigation parameters are a serialization target, never the source of
//! truth: every transition into `JobDetail` or `ApplicationsOfJob` writes
//! `{jobId, mode}`, every return to `JobsList` clears them, and they are read
//! exactly once, on initialization.

use serde::{Deserialize, Serialize};

use crate::domain::JobId;

/// What the workspace is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The paginated list of the employer's jobs. Initial mode.
    JobsList,
    /// One job's detail panel.
    JobDetail,
    /// The paginated list of one job's applications.
    ApplicationsOfJob,
}

/// Wire value of the `mode` navigation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavMode {
    /// Maps to [`ViewMode::JobDetail`].
    View,
    /// Maps to [`ViewMode::ApplicationsOfJob`].
    Applications,
}

impl NavMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Applications => "applications",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "view" => Some(Self::View),
            "applications" => Some(Self::Applications),
            _ => None,
        }
    }
}

/// Externally visible navigation parameters, mirrored from [`ViewState`].
///
/// Either both fields are present (`JobDetail` / `ApplicationsOfJob`) or
/// both are absent (`JobsList`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationParams {
    pub job_id: Option<JobId>,
    pub mode: Option<NavMode>,
}

impl NavigationParams {
    /// Serializes to a query-string fragment: `"jobId=7&mode=applications"`,
    /// or `""` for the jobs list.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match (self.job_id, self.mode) {
            (Some(job_id), Some(mode)) => format!("jobId={job_id}&mode={}", mode.as_str()),
            _ => String::new(),
        }
    }

    /// Parses a query-string fragment leniently: unknown keys are skipped
    /// and malformed values yield `None` fields, which fall back to the
    /// jobs list downstream.
    #[must_use]
    pub fn parse_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "jobId" => params.job_id = value.parse::<i64>().ok().map(JobId),
                "mode" => params.mode = NavMode::parse(value),
                _ => {}
            }
        }
        params
    }
}

/// The view machine: current mode plus the selected job.
///
/// Invariant: `mode != JobsList` implies a selected job id. The selected id
/// is owned exclusively by this machine; other components read it but never
/// mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    selected_job_id: Option<JobId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Starts in `JobsList` with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ViewMode::JobsList,
            selected_job_id: None,
        }
    }

    /// Restores the machine from navigation parameters, as on a reload or a
    /// shared link. Partial or malformed parameters fall back to the jobs
    /// list.
    #[must_use]
    pub fn from_params(params: &NavigationParams) -> Self {
        match (params.job_id, params.mode) {
            (Some(job_id), Some(NavMode::View)) => Self {
                mode: ViewMode::JobDetail,
                selected_job_id: Some(job_id),
            },
            (Some(job_id), Some(NavMode::Applications)) => Self {
                mode: ViewMode::ApplicationsOfJob,
                selected_job_id: Some(job_id),
            },
            _ => Self::new(),
        }
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The job the detail or applications view is scoped to.
    #[must_use]
    pub fn selected_job_id(&self) -> Option<JobId> {
        self.selected_job_id
    }

    /// The navigation parameters mirroring the current state.
    #[must_use]
    pub fn params(&self) -> NavigationParams {
        match self.mode {
            ViewMode::JobsList => NavigationParams::default(),
            ViewMode::JobDetail => NavigationParams {
                job_id: self.selected_job_id,
                mode: Some(NavMode::View),
            },
            ViewMode::ApplicationsOfJob => NavigationParams {
                job_id: self.selected_job_id,
                mode: Some(NavMode::Applications),
            },
        }
    }

    /// Opens a job's detail view. Reachable from every mode: from the jobs
    /// list, from the applications view (stepping back), or re-selecting
    /// within detail.
    pub fn open_job_detail(&mut self, job_id: JobId) {
        self.mode = ViewMode::JobDetail;
        self.selected_job_id = Some(job_id);
    }

    /// Opens a job's applications view. Allowed from that job's detail view;
    /// the applications view itself accepts a re-scope to a different job.
    pub fn open_applications(&mut self, job_id: JobId) -> bool {
        match self.mode {
            ViewMode::JobDetail | ViewMode::ApplicationsOfJob => {
                self.mode = ViewMode::ApplicationsOfJob;
                self.selected_job_id = Some(job_id);
                true
            }
            ViewMode::JobsList => false,
        }
    }

    /// Returns to the jobs list from any mode and clears the selection.
    pub fn back_to_list(&mut self) {
        self.mode = ViewMode::JobsList;
        self.selected_job_id = None;
    }

    /// Drops the machine back to the jobs list when the selected job is no
    /// longer among `present`, e.g. it was deleted on the server. Returns
    /// `true` when a fallback happened.
    pub fn drop_missing_selection(&mut self, present: impl Iterator<Item = JobId>) -> bool {
        let Some(selected) = self.selected_job_id else {
            return false;
        };
        if self.mode == ViewMode::JobsList {
            return false;
        }
        let mut present = present;
        if present.any(|id| id == selected) {
            return false;
        }
        tracing::debug!(job_id = %selected, "selected job missing from fresh page, falling back to list");
        self.back_to_list();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_jobs_list() {
        let view = ViewState::new();
        assert_eq!(view.mode(), ViewMode::JobsList);
        assert!(view.selected_job_id().is_none());
        assert_eq!(view.params(), NavigationParams::default());
    }

    #[test]
    fn detail_and_applications_round_trip_through_params() {
        let mut view = ViewState::new();
        view.open_job_detail(JobId(7));
        assert!(view.open_applications(JobId(7)));

        let params = view.params();
        assert_eq!(params.to_query_string(), "jobId=7&mode=applications");

        let restored = ViewState::from_params(&NavigationParams::parse_query_string(
            &params.to_query_string(),
        ));
        assert_eq!(restored, view);
    }

    #[test]
    fn params_serialize_with_wire_key_names() {
        let params = NavigationParams {
            job_id: Some(JobId(7)),
            mode: Some(NavMode::Applications),
        };
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"jobId":7,"mode":"applications"}"#);
    }

    #[test]
    fn applications_cannot_open_directly_from_list() {
        let mut view = ViewState::new();
        assert!(!view.open_applications(JobId(3)));
        assert_eq!(view.mode(), ViewMode::JobsList);
    }

    #[test]
    fn back_clears_params() {
        let mut view = ViewState::new();
        view.open_job_detail(JobId(4));
        view.back_to_list();
        assert_eq!(view.params().to_query_string(), "");
        assert!(view.selected_job_id().is_none());
    }

    #[test]
    fn partial_params_fall_back_to_list() {
        for query in ["mode=applications", "jobId=9", "jobId=x&mode=view", "mode=edit&jobId=2"] {
            let params = NavigationParams::parse_query_string(query);
            let view = ViewState::from_params(&params);
            assert_eq!(view.mode(), ViewMode::JobsList, "query {query:?}");
        }
    }

    #[test]
    fn selection_missing_from_fresh_page_falls_back() {
        let mut view = ViewState::new();
        view.open_job_detail(JobId(12));

        let fell_back = view.drop_missing_selection([JobId(1), JobId(2)].into_iter());
        assert!(fell_back);
        assert_eq!(view.mode(), ViewMode::JobsList);

        // Nothing selected: nothing to drop.
        assert!(!view.drop_missing_selection(std::iter::empty()));
    }

    #[test]
    fn selection_present_in_fresh_page_is_kept() {
        let mut view = ViewState::new();
        view.open_job_detail(JobId(2));
        assert!(!view.drop_missing_selection([JobId(1), JobId(2)].into_iter()));
        assert_eq!(view.mode(), ViewMode::JobDetail);
    }
}
