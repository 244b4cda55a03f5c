//! Query layer: debounced, paginated, race-safe collection fetching.
//!
//! This module holds the two building blocks behind every list the
//! controller shows:
//!
//! - [`DebounceGate`]: settles rapidly changing search input so each burst
//!   of typing produces at most one fetch
//! - [`QueryPipeline`]: owns a [`QuerySpec`] per collection, sequences
//!   fetches so stale responses can never commit, clamps the page after
//!   total-count updates, and keeps the last-good page visible on failure
//!
//! The layer performs no I/O itself: pipelines hand [`QueryRequest`]s to the
//! runtime driver and receive the eventual results back.

pub mod debounce;
pub mod page;
pub mod pipeline;
pub mod spec;

pub use debounce::DebounceGate;
pub use page::PageResult;
pub use pipeline::{CommitOutcome, QueryPipeline};
pub use spec::{Listable, QueryRequest, QuerySpec, SortOrder, StatusFilter};
