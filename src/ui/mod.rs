//! Read-only view models for the Presentation Layer.
//!
//! The controller never renders. It exposes immutable snapshots of its state
//! ([`WorkspaceViewModel`], [`DialogViewModel`]) that a host UI of any kind
//! (web, TUI, desktop) can render, and accepts user intents back as events.

pub mod viewmodel;

pub use viewmodel::{CollectionViewModel, DialogViewModel, WorkspaceViewModel};
