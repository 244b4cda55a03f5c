//! Query parameter types shared by both collection pipelines.
//!
//! A [`QuerySpec`] describes exactly one request for a collection: settled
//! search text, status filter, sort key and direction, and 1-based page
//! position. Mutating a spec never performs I/O; the owning pipeline turns
//! spec changes into explicit fetch requests.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Application, ApplicationSortField, ApplicationStatus, Job, JobSortField, JobStatus,
};

/// Sort direction requested from the Collection Service.
///
/// The service owns the total order; the pipeline never re-sorts
/// client-side, so equal keys keep whatever relative order the service
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire value for the `sortOrder` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// The opposite direction, used when a sort header is clicked twice.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Status filter applied to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    /// No status restriction.
    All,
    /// Only entities in the given status.
    Only(S),
}

impl<S> StatusFilter<S> {
    /// Returns the restricted status, if any.
    pub fn as_option(&self) -> Option<&S> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

/// Entities the Collection Service can list page-by-page.
///
/// Implemented by [`Job`] and [`Application`]; ties an entity to its status
/// vocabulary and sort keys so one pipeline implementation serves both
/// collections.
pub trait Listable: Clone + Send + 'static {
    /// Status type used by this entity's filter.
    type Status: Copy + Eq + std::fmt::Debug + Send;
    /// Sort keys the Collection Service accepts for this entity.
    type SortField: Copy + Eq + std::fmt::Debug + Send;

    /// Sort applied when a pipeline is created or reset.
    fn default_sort() -> (Self::SortField, SortOrder);

    /// Wire value of a status for the `status` query parameter.
    fn status_wire_name(status: Self::Status) -> &'static str;

    /// Wire value of a sort key for the `sortBy` query parameter.
    fn sort_field_wire_name(field: Self::SortField) -> &'static str;
}

impl Listable for Job {
    type Status = JobStatus;
    type SortField = JobSortField;

    fn default_sort() -> (Self::SortField, SortOrder) {
        (JobSortField::CreatedAt, SortOrder::Descending)
    }

    fn status_wire_name(status: Self::Status) -> &'static str {
        status.as_str()
    }

    fn sort_field_wire_name(field: Self::SortField) -> &'static str {
        field.as_str()
    }
}

impl Listable for Application {
    type Status = ApplicationStatus;
    type SortField = ApplicationSortField;

    fn default_sort() -> (Self::SortField, SortOrder) {
        (ApplicationSortField::CreatedAt, SortOrder::Descending)
    }

    fn status_wire_name(status: Self::Status) -> &'static str {
        status.as_str()
    }

    fn sort_field_wire_name(field: Self::SortField) -> &'static str {
        field.as_str()
    }
}

/// The filter/sort/page parameters describing one request for a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec<T: Listable> {
    /// Settled free-text search term; empty means unfiltered.
    pub search: String,
    /// Status restriction.
    pub status: StatusFilter<T::Status>,
    /// Requested sort key.
    pub sort_field: T::SortField,
    /// Requested sort direction.
    pub sort_order: SortOrder,
    /// 1-based page number. Clamped to `[1, max(1, total_pages)]` after
    /// every total-count update.
    pub page: u32,
    /// Fixed number of items per page for this pipeline.
    pub page_size: u32,
}

impl<T: Listable> QuerySpec<T> {
    /// Creates the default spec for a freshly created or reset pipeline.
    #[must_use]
    pub fn defaults(page_size: u32) -> Self {
        let (sort_field, sort_order) = T::default_sort();
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort_field,
            sort_order,
            page: 1,
            page_size,
        }
    }

    /// Clamps the page into `[1, max(1, total_pages)]`.
    ///
    /// Returns `true` when the page number actually moved.
    pub fn clamp_page(&mut self, total_pages: u32) -> bool {
        let bound = total_pages.max(1);
        let clamped = self.page.clamp(1, bound);
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}

/// One issued fetch, tagged with the sequence number that decides whether its
/// eventual response is still current.
///
/// This is the explicit "query spec changed" notification: every spec
/// mutation produces exactly one `QueryRequest`, and only the response
/// carrying the pipeline's latest sequence may commit.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest<T: Listable> {
    /// Monotonically increasing per-pipeline sequence number.
    pub seq: u64,
    /// Snapshot of the spec at issue time.
    pub spec: QuerySpec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sort_newest_first() {
        let spec = QuerySpec::<Job>::defaults(10);
        assert_eq!(spec.page, 1);
        assert_eq!(spec.sort_field, JobSortField::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Descending);
        assert_eq!(spec.status, StatusFilter::All);
        assert!(spec.search.is_empty());
    }

    #[test]
    fn clamp_page_respects_bounds() {
        let mut spec = QuerySpec::<Job>::defaults(10);
        spec.page = 5;
        assert!(spec.clamp_page(3));
        assert_eq!(spec.page, 3);

        assert!(!spec.clamp_page(3));
        assert_eq!(spec.page, 3);
    }

    #[test]
    fn clamp_page_never_goes_below_one() {
        let mut spec = QuerySpec::<Application>::defaults(10);
        spec.page = 4;
        assert!(spec.clamp_page(0));
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn toggled_flips_direction() {
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
    }
}
