//! View model types representing renderable workspace state.
//!
//! This module defines immutable view models computed from
//! [`WorkspaceState`](crate::app::WorkspaceState), following the MVVM
//! pattern. View models contain no business logic, only display-ready data;
//! the Presentation Layer reads them and forwards user intents back as
//! events. Rendering, styling, and layout are entirely out of scope.

use crate::app::modes::{NavigationParams, ViewMode};
use crate::app::workflow::TransitionWorkflow;
use crate::domain::{Application, Job, JobId};
use crate::query::{Listable, QueryPipeline};

/// Complete workspace view model for one render pass.
#[derive(Debug, Clone)]
pub struct WorkspaceViewModel {
    /// Which view is showing.
    pub mode: ViewMode,

    /// Job the detail/applications view is scoped to, if any.
    pub selected_job_id: Option<JobId>,

    /// Snapshot of the selected job for the detail panel.
    pub selected_job: Option<Job>,

    /// The jobs list (always present; it is the backdrop of every mode).
    pub jobs: CollectionViewModel<Job>,

    /// The applications list; present only in `ApplicationsOfJob` mode.
    pub applications: Option<CollectionViewModel<Application>>,

    /// Confirmation dialog descriptor.
    pub dialog: DialogViewModel,

    /// Navigation parameters mirroring the current view, for hosts that
    /// render shareable links.
    pub navigation: NavigationParams,
}

/// Display state of one paginated collection.
#[derive(Debug, Clone)]
pub struct CollectionViewModel<T> {
    /// Entities on the committed page, in service order.
    pub items: Vec<T>,
    /// 1-based current page.
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    /// `true` while a fetch is in flight; the items shown meanwhile are the
    /// last committed page (stale-while-revalidate).
    pub is_loading: bool,
    /// Banner text from the most recent failed fetch; cleared by a
    /// successful fetch or an explicit retry.
    pub error: Option<String>,
}

impl<T: Listable> CollectionViewModel<T> {
    /// Snapshots a pipeline's visible state.
    #[must_use]
    pub fn from_pipeline(pipeline: &QueryPipeline<T>) -> Self {
        let page = pipeline.current_page();
        Self {
            items: page.items.clone(),
            page: pipeline.spec().page,
            page_size: pipeline.spec().page_size,
            total: page.total,
            total_pages: page.total_pages,
            is_loading: pipeline.is_loading(),
            error: pipeline.error().map(str::to_string),
        }
    }
}

/// Confirmation dialog descriptor consumed by the Presentation Layer.
///
/// The confirm/close callbacks of the dialog contract are event-shaped in
/// this controller: the host sends `ConfirmPending` or `CancelPending` back
/// through the dispatcher instead of invoking closures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogViewModel {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Whether the confirm button stays disabled until the user types the
    /// confirmation phrase exactly.
    pub requires_typing: bool,
    pub confirmation_phrase: Option<String>,
    /// Pre-computed, case-sensitive gate result; hosts should disable the
    /// confirm control while this is `false`.
    pub confirm_enabled: bool,
    /// `true` while the mutation is in flight; the dialog blocks input.
    pub is_submitting: bool,
    /// Inline error from a rejected mutation.
    pub error: Option<String>,
}

impl DialogViewModel {
    /// Snapshots the workflow's dialog, closed when nothing is pending.
    #[must_use]
    pub fn from_workflow(workflow: &TransitionWorkflow) -> Self {
        let Some(pending) = workflow.pending() else {
            return Self::default();
        };
        Self {
            is_open: true,
            title: pending.title.clone(),
            message: pending.message.clone(),
            confirm_text: pending.confirm_text.clone(),
            cancel_text: pending.cancel_text.clone(),
            requires_typing: pending.requires_typing,
            confirmation_phrase: pending.confirmation_phrase.clone(),
            confirm_enabled: pending.confirm_enabled() && !workflow.is_submitting(),
            is_submitting: workflow.is_submitting(),
            error: pending.error.clone(),
        }
    }
}
