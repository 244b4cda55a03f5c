//! Async driver executing side effects for the event handler.
//!
//! The event handler is a pure function over [`WorkspaceState`]; this module
//! is where its [`Action`]s actually happen. The driver owns the two service
//! trait objects and the per-pipeline debounce gates, runs the event loop,
//! and feeds completions back into the handler as events. Everything the
//! embedding host needs to react to (re-renders, navigation updates, CV
//! downloads) leaves through the [`HostCommand`] channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::{
    handle_event, Action, Event, NavigationParams, PipelineKind, ViewState, WorkspaceState,
};
use crate::domain::{ApplicationId, JobId};
use crate::query::DebounceGate;
use crate::service::{ActionService, CollectionQuery, CollectionService};
use crate::ui::WorkspaceViewModel;
use crate::Config;

/// Outbound commands for the embedding host.
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Visible state changed; the host should re-render this snapshot.
    Render(WorkspaceViewModel),
    /// The view machine moved; the host should reflect these parameters in
    /// its address bar or session storage.
    SyncNavigation(NavigationParams),
    /// The host should download the applicant's CV artifact.
    DownloadCv { application_id: ApplicationId },
}

/// Handles the host keeps after spawning the driver.
pub struct DriverHandle {
    /// User intents go in here.
    pub events: mpsc::UnboundedSender<Event>,
    /// Render/navigation/download commands come out here.
    pub commands: mpsc::UnboundedReceiver<HostCommand>,
}

/// Event loop wiring the handler to services, timers, and the host.
pub struct Driver {
    state: WorkspaceState,
    collections: Arc<dyn CollectionService>,
    mutations: Arc<dyn ActionService>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    jobs_gate: DebounceGate<String>,
    jobs_settled_rx: mpsc::UnboundedReceiver<String>,
    // Applications values carry the job scope they were typed under, so a
    // value settling after the view moved to another job is dropped by the
    // handler instead of polluting the fresh pipeline.
    applications_gate: DebounceGate<(JobId, String)>,
    applications_settled_rx: mpsc::UnboundedReceiver<(JobId, String)>,
    host_tx: mpsc::UnboundedSender<HostCommand>,
}

impl Driver {
    /// Builds a driver with a fresh view machine.
    pub fn new(
        config: &Config,
        collections: Arc<dyn CollectionService>,
        mutations: Arc<dyn ActionService>,
    ) -> (Self, DriverHandle) {
        Self::with_state(config, WorkspaceState::new(config), collections, mutations)
    }

    /// Builds a driver whose view machine is restored from navigation
    /// parameters (page reload or shared link).
    pub fn restored(
        config: &Config,
        params: &NavigationParams,
        collections: Arc<dyn CollectionService>,
        mutations: Arc<dyn ActionService>,
    ) -> (Self, DriverHandle) {
        let state = WorkspaceState::with_view(config, ViewState::from_params(params));
        Self::with_state(config, state, collections, mutations)
    }

    fn with_state(
        config: &Config,
        state: WorkspaceState,
        collections: Arc<dyn CollectionService>,
        mutations: Arc<dyn ActionService>,
    ) -> (Self, DriverHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (jobs_settled_tx, jobs_settled_rx) = mpsc::unbounded_channel();
        let (applications_settled_tx, applications_settled_rx) = mpsc::unbounded_channel();
        let window = Duration::from_millis(config.debounce_ms);

        let handle = DriverHandle {
            events: events_tx.clone(),
            commands: host_rx,
        };
        let driver = Self {
            state,
            collections,
            mutations,
            events_tx,
            events_rx,
            jobs_gate: DebounceGate::new(window, jobs_settled_tx),
            jobs_settled_rx,
            applications_gate: DebounceGate::new(window, applications_settled_tx),
            applications_settled_rx,
            host_tx,
        };
        (driver, handle)
    }

    /// Runs the event loop until the host drops its command receiver.
    pub async fn run(mut self) {
        self.dispatch(Event::Started);

        loop {
            tokio::select! {
                Some(event) = self.events_rx.recv() => self.dispatch(event),
                Some(term) = self.jobs_settled_rx.recv() => {
                    self.dispatch(Event::JobsSearchSettled(term));
                }
                Some((job_id, term)) = self.applications_settled_rx.recv() => {
                    self.dispatch(Event::ApplicationsSearchSettled { job_id, term });
                }
                () = self.host_tx.closed() => break,
            }
        }
    }

    fn dispatch(&mut self, event: Event) {
        match handle_event(&mut self.state, &event) {
            Ok((render, actions)) => {
                for action in actions {
                    self.execute(action);
                }
                if render {
                    // Host gone means shutdown; the loop notices on its own.
                    let _ = self
                        .host_tx
                        .send(HostCommand::Render(self.state.compute_viewmodel()));
                }
            }
            Err(error) => {
                tracing::warn!(?event, error = %error, "event rejected");
            }
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::DebounceJobsSearch(term) => self.jobs_gate.observe(term),
            Action::DebounceApplicationsSearch { job_id, term } => {
                self.applications_gate.observe((job_id, term));
            }
            Action::CancelSearchDebounce(pipeline) => match pipeline {
                PipelineKind::Jobs => self.jobs_gate.cancel(),
                PipelineKind::Applications => self.applications_gate.cancel(),
            },
            Action::FetchJobs(request) => {
                let collections = Arc::clone(&self.collections);
                let events = self.events_tx.clone();
                let seq = request.seq;
                let query = CollectionQuery::from_spec(&request.spec);
                tokio::spawn(async move {
                    let event = match collections.list_jobs(query).await {
                        Ok(envelope) => Event::JobsPageLoaded {
                            seq,
                            data: envelope.data,
                            meta: envelope.meta,
                        },
                        Err(error) => Event::JobsFetchFailed {
                            seq,
                            message: error.to_string(),
                        },
                    };
                    let _ = events.send(event);
                });
            }
            Action::FetchApplications { job_id, request } => {
                let collections = Arc::clone(&self.collections);
                let events = self.events_tx.clone();
                let seq = request.seq;
                let query = CollectionQuery::from_spec(&request.spec);
                tokio::spawn(async move {
                    let event = match collections.list_applications(job_id, query).await {
                        Ok(envelope) => Event::ApplicationsPageLoaded {
                            seq,
                            job_id,
                            data: envelope.data,
                            meta: envelope.meta,
                        },
                        Err(error) => Event::ApplicationsFetchFailed {
                            seq,
                            message: error.to_string(),
                        },
                    };
                    let _ = events.send(event);
                });
            }
            Action::SubmitJobStatus { job_id, change } => {
                let mutations = Arc::clone(&self.mutations);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let event = match mutations.set_job_status(job_id, change).await {
                        Ok(receipt) if receipt.is_success() => Event::MutationSucceeded,
                        Ok(receipt) => {
                            Event::MutationFailed(format!("status {}", receipt.status_code))
                        }
                        Err(error) => Event::MutationFailed(error.to_string()),
                    };
                    let _ = events.send(event);
                });
            }
            Action::SubmitApplicationStatus {
                application_id,
                status,
            } => {
                let mutations = Arc::clone(&self.mutations);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let event = match mutations.set_application_status(application_id, status).await
                    {
                        Ok(receipt) if receipt.is_success() => Event::MutationSucceeded,
                        Ok(receipt) => {
                            Event::MutationFailed(format!("status {}", receipt.status_code))
                        }
                        Err(error) => Event::MutationFailed(error.to_string()),
                    };
                    let _ = events.send(event);
                });
            }
            Action::SyncNavigation(params) => {
                let _ = self.host_tx.send(HostCommand::SyncNavigation(params));
            }
            Action::DownloadCv { application_id } => {
                let _ = self
                    .host_tx
                    .send(HostCommand::DownloadCv { application_id });
            }
        }
    }
}
