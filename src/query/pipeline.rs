//! Paginated, filterable, sortable fetch pipeline for one collection.
//!
//! A [`QueryPipeline`] owns the [`QuerySpec`] for one collection (jobs, or
//! applications of one job), the last committed [`PageResult`], and the
//! request sequencing that makes the controller race-safe: every spec change
//! issues exactly one [`QueryRequest`] tagged with a fresh sequence number,
//! and only the response carrying the latest sequence may commit. Responses
//! to superseded requests are discarded without touching visible state.
//!
//! The pipeline never performs I/O. Mutators return the request the runtime
//! driver should execute; the driver reports back through
//! [`commit_success`](QueryPipeline::commit_success) and
//! [`commit_failure`](QueryPipeline::commit_failure).
//!
//! # Failure posture
//!
//! A fetch failure keeps the last-good page visible and raises an error
//! banner; nothing is destructively cleared. [`retry`](QueryPipeline::retry)
//! re-issues the current spec.

use super::page::PageResult;
use super::spec::{Listable, QueryRequest, QuerySpec, SortOrder, StatusFilter};

/// Result of offering a fetch response to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome<T: Listable> {
    /// The response matched the latest request and is now visible.
    Applied,
    /// The response belonged to a superseded request and was discarded.
    Stale,
    /// The response was applied, but the reported total pulled the current
    /// page out of range; the pipeline clamped it and wants one follow-up
    /// fetch for the clamped page.
    Refetch(QueryRequest<T>),
}

/// Holds filter/sort/page state for one collection and sequences its
/// fetches.
#[derive(Debug)]
pub struct QueryPipeline<T: Listable> {
    /// Pipeline label used in tracing output (`"jobs"`, `"applications"`).
    name: &'static str,
    spec: QuerySpec<T>,
    committed: PageResult<T>,
    loading: bool,
    error: Option<String>,
    /// Sequence of the most recently issued request; 0 means none yet.
    latest_seq: u64,
    /// Guards the clamp-then-refetch cycle to at most one retry per cause.
    clamp_retried: bool,
    /// Set once a response has committed, enabling eager client-side
    /// clamping against the known page count.
    has_committed: bool,
}

impl<T: Listable> QueryPipeline<T> {
    /// Creates a pipeline with default spec and an empty committed page.
    #[must_use]
    pub fn new(name: &'static str, page_size: u32) -> Self {
        Self {
            name,
            spec: QuerySpec::defaults(page_size),
            committed: PageResult::empty(),
            loading: false,
            error: None,
            latest_seq: 0,
            clamp_retried: false,
            has_committed: false,
        }
    }

    /// The current query spec.
    #[must_use]
    pub fn spec(&self) -> &QuerySpec<T> {
        &self.spec
    }

    /// The latest committed page (stale-while-revalidate: remains visible
    /// while a newer fetch is in flight).
    #[must_use]
    pub fn current_page(&self) -> &PageResult<T> {
        &self.committed
    }

    /// `true` while the latest issued request has not resolved.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error banner from the most recent failed fetch, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies a settled search term and issues a fetch from page 1.
    ///
    /// The caller is expected to route raw keystrokes through the
    /// [`DebounceGate`](super::debounce::DebounceGate) first; this method
    /// commits the settled value.
    pub fn set_search(&mut self, term: String) -> QueryRequest<T> {
        self.spec.search = term;
        self.spec.page = 1;
        self.issue_user()
    }

    /// Applies a status filter and issues a fetch from page 1.
    pub fn set_status_filter(&mut self, status: StatusFilter<T::Status>) -> QueryRequest<T> {
        self.spec.status = status;
        self.spec.page = 1;
        self.issue_user()
    }

    /// Applies an explicit sort and issues a fetch.
    pub fn set_sort(&mut self, field: T::SortField, order: SortOrder) -> QueryRequest<T> {
        self.spec.sort_field = field;
        self.spec.sort_order = order;
        self.issue_user()
    }

    /// Sorts by `field`, flipping the direction when `field` is already the
    /// active sort key (list-header click behavior); otherwise applies the
    /// entity's default direction.
    pub fn toggle_sort(&mut self, field: T::SortField) -> QueryRequest<T> {
        let order = if self.spec.sort_field == field {
            self.spec.sort_order.toggled()
        } else {
            T::default_sort().1
        };
        self.set_sort(field, order)
    }

    /// Moves to page `n` and issues a fetch.
    ///
    /// Once a page count is known the target is clamped eagerly, so a
    /// pagination control asking for page 5 of 3 fetches page 3 directly.
    /// Before the first commit no count exists and the service's reported
    /// totals clamp retroactively instead.
    pub fn set_page(&mut self, n: u32) -> QueryRequest<T> {
        self.spec.page = n.max(1);
        if self.has_committed {
            self.spec.clamp_page(self.committed.total_pages);
        }
        self.issue_user()
    }

    /// Re-issues the current spec unchanged. Used after a successful
    /// mutation so the affected collection reflects the server's state.
    pub fn refetch(&mut self) -> QueryRequest<T> {
        self.issue_user()
    }

    /// Manual retry after a fetch failure; identical to [`refetch`] but
    /// clears the error banner immediately.
    ///
    /// [`refetch`]: QueryPipeline::refetch
    pub fn retry(&mut self) -> QueryRequest<T> {
        self.error = None;
        self.issue_user()
    }

    /// Restores the default spec, drops the committed page, and issues a
    /// fetch. Used when the applications pipeline is re-scoped to a
    /// different job so no filter, sort, or page leaks across jobs.
    pub fn reset(&mut self) -> QueryRequest<T> {
        self.spec = QuerySpec::defaults(self.spec.page_size);
        self.committed = PageResult::empty();
        self.error = None;
        self.has_committed = false;
        self.issue_user()
    }

    /// Offers a successful response for request `seq`.
    ///
    /// Stale sequences are discarded. A current response commits, clears
    /// the error banner, and recomputes the page bound; if the reported
    /// totals pulled the current page out of range the pipeline clamps and
    /// asks for one follow-up fetch.
    pub fn commit_success(
        &mut self,
        seq: u64,
        items: Vec<T>,
        total: u64,
        total_pages: u32,
    ) -> CommitOutcome<T> {
        if seq != self.latest_seq {
            tracing::debug!(
                pipeline = self.name,
                stale_seq = seq,
                latest_seq = self.latest_seq,
                "discarding stale response"
            );
            return CommitOutcome::Stale;
        }

        self.loading = false;
        self.error = None;
        self.committed = PageResult::from_response(items, total, total_pages, self.spec.page_size);
        self.has_committed = true;

        let moved = self.spec.clamp_page(self.committed.total_pages);
        if moved && !self.clamp_retried {
            self.clamp_retried = true;
            tracing::debug!(
                pipeline = self.name,
                clamped_page = self.spec.page,
                total_pages = self.committed.total_pages,
                "page out of range, refetching clamped page"
            );
            return CommitOutcome::Refetch(self.issue());
        }

        self.clamp_retried = false;
        tracing::debug!(
            pipeline = self.name,
            seq,
            total,
            total_pages = self.committed.total_pages,
            page = self.spec.page,
            "page committed"
        );
        CommitOutcome::Applied
    }

    /// Offers a failed response for request `seq`.
    ///
    /// Stale sequences are discarded. A current failure stops the loading
    /// indicator and raises the error banner while the last-good page stays
    /// visible.
    pub fn commit_failure(&mut self, seq: u64, message: impl Into<String>) -> CommitOutcome<T> {
        if seq != self.latest_seq {
            return CommitOutcome::Stale;
        }

        self.loading = false;
        let message = message.into();
        tracing::warn!(pipeline = self.name, seq, error = %message, "fetch failed");
        self.error = Some(message);
        CommitOutcome::Applied
    }

    /// Issues a request on behalf of a caller-driven spec change. A fresh
    /// cause re-arms the clamp-retry guard.
    fn issue_user(&mut self) -> QueryRequest<T> {
        self.clamp_retried = false;
        self.issue()
    }

    /// Issues a new request for the current spec, superseding any request
    /// still in flight.
    fn issue(&mut self) -> QueryRequest<T> {
        self.latest_seq += 1;
        self.loading = true;
        tracing::debug!(
            pipeline = self.name,
            seq = self.latest_seq,
            page = self.spec.page,
            search = %self.spec.search,
            "issuing fetch"
        );
        QueryRequest {
            seq: self.latest_seq,
            spec: self.spec.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Job, JobSortField, JobStatus};

    fn jobs_pipeline() -> QueryPipeline<Job> {
        QueryPipeline::new("jobs", 10)
    }

    fn job(id: i64) -> Job {
        use crate::domain::{EmploymentType, JobId, SalaryRange};
        Job {
            id: JobId(id),
            title: format!("Job {id}"),
            status: JobStatus::Active,
            location: "Remote".to_string(),
            employment_type: EmploymentType::FullTime,
            salary: SalaryRange {
                currency: "USD".to_string(),
                min: 60_000,
                max: 90_000,
            },
            applicant_count: 0,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn spec_changes_issue_monotonic_sequences() {
        let mut p = jobs_pipeline();
        let a = p.set_search("rust".to_string());
        let b = p.set_page(2);
        let c = p.refetch();
        assert!(a.seq < b.seq && b.seq < c.seq);
        assert!(p.is_loading());
    }

    #[test]
    fn only_the_latest_response_commits() {
        let mut p = jobs_pipeline();
        let first = p.set_search("old".to_string());
        let second = p.set_search("new".to_string());

        // The slow response for the superseded request arrives last-minute
        // first; it must not become visible.
        let outcome = p.commit_success(first.seq, vec![job(1)], 1, 1);
        assert_eq!(outcome, CommitOutcome::Stale);
        assert!(p.current_page().items.is_empty());
        assert!(p.is_loading());

        let outcome = p.commit_success(second.seq, vec![job(2)], 1, 1);
        assert_eq!(outcome, CommitOutcome::Applied);
        assert_eq!(p.current_page().items[0].title, "Job 2");
        assert!(!p.is_loading());
    }

    #[test]
    fn stale_failures_are_also_discarded() {
        let mut p = jobs_pipeline();
        let first = p.refetch();
        let second = p.refetch();

        assert_eq!(
            p.commit_failure(first.seq, "timeout"),
            CommitOutcome::Stale
        );
        assert!(p.error().is_none());

        p.commit_success(second.seq, vec![], 0, 1);
        assert!(p.error().is_none());
    }

    #[test]
    fn out_of_range_page_clamps_and_refetches_once() {
        let mut p = jobs_pipeline();
        let req = p.set_page(5);
        assert_eq!(req.spec.page, 5);

        // 30 jobs at page size 10: the service reports 3 pages.
        let outcome = p.commit_success(req.seq, vec![], 30, 3);
        let CommitOutcome::Refetch(follow_up) = outcome else {
            panic!("expected clamp refetch, got {outcome:?}");
        };
        assert_eq!(follow_up.spec.page, 3);

        // The follow-up commits normally and does not loop.
        let outcome = p.commit_success(follow_up.seq, vec![job(21)], 30, 3);
        assert_eq!(outcome, CommitOutcome::Applied);
        assert_eq!(p.spec().page, 3);
    }

    #[test]
    fn clamp_retry_is_bounded_to_one() {
        let mut p = jobs_pipeline();
        let req = p.set_page(9);

        let CommitOutcome::Refetch(follow_up) = p.commit_success(req.seq, vec![], 50, 5) else {
            panic!("expected refetch");
        };
        assert_eq!(follow_up.spec.page, 5);

        // A pathological service shrinks again; the pipeline clamps its
        // local spec but refuses a second automatic fetch.
        let outcome = p.commit_success(follow_up.seq, vec![], 20, 2);
        assert_eq!(outcome, CommitOutcome::Applied);
        assert_eq!(p.spec().page, 2);
    }

    #[test]
    fn known_page_count_clamps_eagerly() {
        let mut p = jobs_pipeline();
        let req = p.refetch();
        p.commit_success(req.seq, vec![job(1)], 30, 3);

        let req = p.set_page(5);
        assert_eq!(req.spec.page, 3, "clamped before fetching");
    }

    #[test]
    fn failure_keeps_last_good_page_visible() {
        let mut p = jobs_pipeline();
        let req = p.refetch();
        p.commit_success(req.seq, vec![job(1), job(2)], 2, 1);

        let req = p.set_page(1);
        p.commit_failure(req.seq, "service unavailable");

        assert_eq!(p.current_page().items.len(), 2);
        assert_eq!(p.error(), Some("service unavailable"));
        assert!(!p.is_loading());

        let retry = p.retry();
        assert!(p.error().is_none());
        p.commit_success(retry.seq, vec![job(1), job(2)], 2, 1);
        assert!(p.error().is_none());
    }

    #[test]
    fn search_and_filter_reset_to_page_one() {
        let mut p = jobs_pipeline();
        let req = p.refetch();
        p.commit_success(req.seq, vec![job(1)], 30, 3);
        p.set_page(3);

        let req = p.set_search("senior".to_string());
        assert_eq!(req.spec.page, 1);

        p.set_page(2);
        let req = p.set_status_filter(StatusFilter::Only(JobStatus::Paused));
        assert_eq!(req.spec.page, 1);
    }

    #[test]
    fn repeating_a_sort_request_is_idempotent() {
        let mut p = jobs_pipeline();
        let a = p.set_sort(JobSortField::Title, SortOrder::Ascending);
        let b = p.set_sort(JobSortField::Title, SortOrder::Ascending);
        assert_eq!(a.spec, b.spec);

        let items = vec![job(1), job(2), job(3)];
        p.commit_success(b.seq, items.clone(), 3, 1);
        let first_order: Vec<_> = p.current_page().items.iter().map(|j| j.id).collect();

        let c = p.set_sort(JobSortField::Title, SortOrder::Ascending);
        p.commit_success(c.seq, items, 3, 1);
        let second_order: Vec<_> = p.current_page().items.iter().map(|j| j.id).collect();
        assert_eq!(first_order, second_order);
    }

    #[test]
    fn toggle_sort_flips_direction_on_active_field() {
        let mut p = jobs_pipeline();
        let req = p.toggle_sort(JobSortField::CreatedAt);
        assert_eq!(req.spec.sort_order, SortOrder::Ascending);

        let req = p.toggle_sort(JobSortField::Title);
        assert_eq!(req.spec.sort_order, SortOrder::Descending);
        let req = p.toggle_sort(JobSortField::Title);
        assert_eq!(req.spec.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn reset_restores_defaults_and_clears_the_page() {
        let mut p = jobs_pipeline();
        let req = p.set_search("leaky".to_string());
        p.commit_success(req.seq, vec![job(7)], 1, 1);
        p.set_status_filter(StatusFilter::Only(JobStatus::Closed));
        p.set_page(2);

        let req = p.reset();
        assert_eq!(req.spec, QuerySpec::defaults(10));
        assert!(p.current_page().items.is_empty());
        assert!(p.error().is_none());
    }
}
