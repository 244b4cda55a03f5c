//! Jobdeck: an embeddable view and query controller for an employer job
//! workspace.
//!
//! Jobdeck is the headless core of a job-board employer dashboard:
//! - A view state machine over the jobs list, job detail, and per-job
//!   applications views, serializable to navigation parameters
//! - Two debounced, paginated, sorted, filtered query pipelines (jobs and
//!   applications) with stale-response protection
//! - A confirmation-gated status transition workflow for jobs and
//!   applications, including a typed phrase gate for deletion
//! - An async driver that executes fetches and mutations against pluggable
//!   service traits and hands render snapshots to the host
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Embedding Host (web view, TUI, tests)              │  ← Renders view models
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime Layer (runtime/)                           │  ← Event loop
//! │  - Driver executing actions                         │  ← Debounce timers
//! │  - Host command channel                             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Transition workflow                              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Service Layer │
//! │ (ui/)         │   │ (query/)      │   │ (service/)    │
//! │ - View models │   │ - Pipelines   │   │ - Traits      │
//! │ - Dialog copy │   │ - Debounce    │   │ - Wire types  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Jobs, applications, status tables                │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event handler, view machine, transition workflow, state
//! - [`domain`]: Jobs, applications, and their status transition tables
//! - [`query`]: Query pipelines, pagination, debounce gate
//! - [`service`]: Collection/Action service traits and wire types
//! - [`runtime`]: Async driver and host command channel
//! - [`ui`]: Immutable view models for the Presentation Layer
//! - [`observability`]: Tracing subscriber setup
//!
//! # Examples
//!
//! ## Synchronous core (no runtime)
//!
//! ```rust
//! use jobdeck::{handle_event, Config, Event};
//!
//! let config = Config::default();
//! let mut state = jobdeck::initialize(&config);
//!
//! let (render, actions) = handle_event(&mut state, &Event::Started)?;
//! assert!(render);
//! // Execute actions against your own services...
//! # let _ = actions;
//! # Ok::<(), jobdeck::Error>(())
//! ```
//!
//! ## Async driver
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jobdeck::runtime::Driver;
//! use jobdeck::Config;
//! # fn services() -> (Arc<dyn jobdeck::service::CollectionService>, Arc<dyn jobdeck::service::ActionService>) { unimplemented!() }
//!
//! # async fn demo() {
//! let (collections, mutations) = services();
//! let (driver, mut handle) = Driver::new(&Config::default(), collections, mutations);
//! tokio::spawn(driver.run());
//!
//! while let Some(command) = handle.commands.recv().await {
//!     // Render snapshots, sync navigation, download CVs.
//!     # let _ = command;
//! }
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Server-Confirmed Updates
//!
//! Local state never changes optimistically: a status mutation takes effect
//! only after the Action Service reports success, with the workflow's
//! `Submitting` phase gating the dialog in between. On failure the dialog
//! reopens with the error and the lists are untouched.
//!
//! ## Sequenced Fetches
//!
//! Every pipeline fetch carries a monotonically increasing sequence number.
//! Responses are committed only when their sequence is still the latest, so
//! a slow early response can never overwrite a newer page.
//!
//! ## Immutable View Models
//!
//! Rendering uses computed view models:
//! - Clear separation between state and display
//! - Enables easier testing and validation
//! - The confirmation dialog's copy and enablement are pre-computed

pub mod app;
pub mod domain;
pub mod observability;
pub mod query;
pub mod runtime;
pub mod service;
pub mod ui;

pub use app::{handle_event, Action, Event, NavigationParams, ViewMode, WorkspaceState};
pub use domain::{Error, Result};
pub use runtime::{Driver, DriverHandle, HostCommand};
pub use ui::WorkspaceViewModel;

use serde::Deserialize;
use std::path::Path;

/// Controller configuration.
///
/// Hosts construct this directly or load it from a TOML file:
///
/// ```toml
/// debounce_ms = 400
/// jobs_page_size = 20
/// applications_page_size = 10
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Quiet window after the last search keystroke before a fetch fires,
    /// in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Rows per page on the jobs list. Default: 10
    pub jobs_page_size: u32,

    /// Rows per page on a job's applications list. Default: 10
    pub applications_page_size: u32,

    /// Tracing level for the built-in subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            jobs_page_size: 10,
            applications_page_size: 10,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// carries a zero page size or debounce window.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs_page_size == 0 || self.applications_page_size == 0 {
            return Err(Error::Config("page sizes must be at least 1".to_string()));
        }
        if self.debounce_ms == 0 {
            return Err(Error::Config(
                "debounce_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initializes the controller core.
///
/// Sets up tracing (if `trace_level` is configured) and returns a fresh
/// [`WorkspaceState`] on the jobs list view. Hosts embedding the async
/// driver can skip this and use [`runtime::Driver::new`] directly.
#[must_use]
pub fn initialize(config: &Config) -> WorkspaceState {
    if config.trace_level.is_some() {
        observability::init_tracing(config);
    }
    tracing::debug!(
        jobs_page_size = config.jobs_page_size,
        applications_page_size = config.applications_page_size,
        "initializing workspace controller"
    );
    WorkspaceState::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.jobs_page_size, 10);
        assert_eq!(config.applications_page_size, 10);
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn config_loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 300\njobs_page_size = 25").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.jobs_page_size, 25);
        // Unspecified fields keep their defaults.
        assert_eq!(config.applications_page_size, 10);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = ").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jobs_page_size = 0").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn initialize_starts_on_the_jobs_list() {
        let state = initialize(&Config::default());
        assert_eq!(state.view.mode(), ViewMode::JobsList);
        assert!(state.jobs.current_page().items.is_empty());
    }
}
