//! Structured logging for the controller.
//!
//! Every layer emits through the [`tracing`] facade: the event handler opens
//! a `debug_span!` per event, pipelines log request sequencing and commit
//! outcomes, and the workflow logs phase changes. This module only wires up
//! a subscriber; hosts that already run one keep full control.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
