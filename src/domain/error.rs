//! Error types for the jobdeck controller.
//!
//! This module defines the centralized error type [`Error`] and a type alias
//! [`Result`] for convenient error handling throughout the controller. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! Runtime failures that the controller is designed to absorb (fetch errors,
//! rejected mutations) are *not* represented here: they degrade into visible,
//! retryable state such as pipeline error banners. `Error` is reserved for
//! contract violations and configuration problems.

use thiserror::Error;

use super::application::ApplicationStatus;
use super::job::JobStatus;

/// The main error type for controller operations.
///
/// Most variants signal a programming-contract violation by the embedding
/// Presentation Layer, such as requesting a status move that the transition
/// table forbids. These are rejected before any dialog opens or any mutation
/// is issued.
#[derive(Debug, Error)]
pub enum Error {
    /// A job status move outside the allowed transition table was requested.
    ///
    /// The workflow refuses to open a confirmation dialog for such a move;
    /// `Closed` and `Deleted` are terminal and have no path back.
    #[error("invalid job transition: {from:?} -> {to:?}")]
    InvalidJobTransition {
        /// Status the job currently has.
        from: JobStatus,
        /// Status the caller asked for.
        to: JobStatus,
    },

    /// An application status move outside the allowed transition table was
    /// requested.
    #[error("invalid application transition: {from:?} -> {to:?}")]
    InvalidApplicationTransition {
        /// Status the application currently has.
        from: ApplicationStatus,
        /// Status the caller asked for.
        to: ApplicationStatus,
    },

    /// A transition workflow operation was invoked in the wrong phase.
    ///
    /// Examples: confirming while no transition is pending, or confirming a
    /// deletion before the typed confirmation phrase matches.
    #[error("workflow error: {0}")]
    Workflow(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed as TOML.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Only configuration-file loading performs I/O in this crate.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
