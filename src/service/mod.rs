//! External service contracts consumed by the controller.
//!
//! The controller talks to two collaborators it does not implement:
//!
//! - the **Collection Service** ([`CollectionService`]): paginated, filtered,
//!   sorted queries for jobs and for the applications of one job
//! - the **Action Service** ([`ActionService`]): status mutations and
//!   partial job edits
//!
//! Both are object-safe async traits so the embedding host can back them
//! with any transport (REST client, in-process fake, recording mock). Wire
//! types mirror the REST-like contract: `camelCase` field names and a
//! `{data, meta}` page envelope. A mutation succeeds exactly when its
//! receipt carries status code 200; transport failures and non-200 receipts
//! are both surfaced to the user as retryable errors, never as panics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Application, ApplicationId, ApplicationStatus, Job, JobId, JobStatus};
use crate::query::{Listable, QuerySpec};

/// Failure reported by a service implementation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a usable response (network failure,
    /// timeout, connection refused).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Wire form of one collection query, as the Collection Service accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Status filter wire value; `None` means all statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub sort_by: String,
    /// `"asc"` or `"desc"`.
    pub sort_order: String,
    /// Free-text search; `None` when the settled term is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CollectionQuery {
    /// Lowers a typed [`QuerySpec`] into its wire form.
    #[must_use]
    pub fn from_spec<T: Listable>(spec: &QuerySpec<T>) -> Self {
        Self {
            page: spec.page,
            limit: spec.page_size,
            status: spec
                .status
                .as_option()
                .map(|s| T::status_wire_name(*s).to_string()),
            sort_by: T::sort_field_wire_name(spec.sort_field).to_string(),
            sort_order: spec.sort_order.as_str().to_string(),
            search: if spec.search.is_empty() {
                None
            } else {
                Some(spec.search.clone())
            },
        }
    }
}

/// Pagination metadata reported alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub total_pages: u32,
}

/// One page of entities plus its metadata, as the Collection Service
/// returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Receipt for a mutation request. Success is exactly status code 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReceipt {
    pub status_code: u16,
}

impl MutationReceipt {
    /// Receipt for an accepted mutation.
    #[must_use]
    pub fn ok() -> Self {
        Self { status_code: 200 }
    }

    /// `true` exactly when the service reported 200.
    #[must_use]
    pub fn is_success(self) -> bool {
        self.status_code == 200
    }
}

/// Payload of a job status mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusChange {
    pub status: JobStatus,
    /// Human-readable reason recorded with the transition.
    pub reason: String,
}

/// Partial job edit accepted by `update_job`. Fields left as `None` are
/// unchanged. Status is deliberately absent: status moves only through the
/// confirmation-gated workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
}

/// Read side: paginated queries for jobs and per-job applications.
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// Lists the employer's jobs for one query.
    async fn list_jobs(&self, query: CollectionQuery) -> Result<PageEnvelope<Job>, ServiceError>;

    /// Lists the applications of one job for one query.
    async fn list_applications(
        &self,
        job_id: JobId,
        query: CollectionQuery,
    ) -> Result<PageEnvelope<Application>, ServiceError>;
}

/// Write side: confirmation-gated status mutations and partial edits.
#[async_trait]
pub trait ActionService: Send + Sync {
    /// Moves a job to a new status with an audit reason.
    async fn set_job_status(
        &self,
        job_id: JobId,
        change: JobStatusChange,
    ) -> Result<MutationReceipt, ServiceError>;

    /// Moves an application to a new status.
    async fn set_application_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<MutationReceipt, ServiceError>;

    /// Applies a partial edit to a job's non-status fields.
    async fn update_job(
        &self,
        job_id: JobId,
        patch: JobPatch,
    ) -> Result<MutationReceipt, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SortOrder, StatusFilter};

    #[test]
    fn query_spec_lowers_to_wire_form() {
        let mut spec = QuerySpec::<Job>::defaults(10);
        spec.search = "senior".to_string();
        spec.status = StatusFilter::Only(JobStatus::Active);
        spec.sort_order = SortOrder::Ascending;
        spec.page = 2;

        let query = CollectionQuery::from_spec(&spec);
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 10);
        assert_eq!(query.status.as_deref(), Some("active"));
        assert_eq!(query.sort_by, "created_at");
        assert_eq!(query.sort_order, "asc");
        assert_eq!(query.search.as_deref(), Some("senior"));
    }

    #[test]
    fn empty_search_and_all_statuses_are_omitted() {
        let spec = QuerySpec::<Job>::defaults(10);
        let query = CollectionQuery::from_spec(&spec);
        assert!(query.status.is_none());
        assert!(query.search.is_none());

        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("status").is_none());
        assert!(json.get("search").is_none());
        assert_eq!(json["sortOrder"], "desc");
    }

    #[test]
    fn page_envelope_uses_camel_case_meta() {
        let json = serde_json::json!({
            "data": [],
            "meta": {"total": 30, "totalPages": 3}
        });
        let envelope: PageEnvelope<Job> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.meta.total, 30);
        assert_eq!(envelope.meta.total_pages, 3);
    }

    #[test]
    fn only_200_is_success() {
        assert!(MutationReceipt::ok().is_success());
        assert!(!MutationReceipt { status_code: 204 }.is_success());
        assert!(!MutationReceipt { status_code: 500 }.is_success());
    }
}
