//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core controller logic, sitting between the async
//! runtime driver and the domain/service layers. It implements the
//! event-driven architecture that powers the workspace UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Intents → Events → Event Handler → State Mutations → Actions → Side Effects
//!                            ↑                                    ↓
//!                            └──────── Service Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode state machine and navigation parameter types
//! - [`state`]: Central workspace state container and view model computation
//! - [`workflow`]: Confirmation-gated status transition workflow

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod workflow;

pub use actions::{Action, PipelineKind};
pub use handler::{handle_event, Event};
pub use modes::{NavMode, NavigationParams, ViewMode, ViewState};
pub use state::WorkspaceState;
pub use workflow::{PendingTransition, TransitionWorkflow, DELETE_JOB_PHRASE};
