//! Domain layer for the jobdeck controller.
//!
//! This module contains the core domain types and business rules for the
//! controller, independent of the service transport or any Presentation Layer
//! concerns. It follows domain-driven design principles by keeping the
//! transition tables and entity models isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`job`]: Job entity, status lifecycle, and job transition table
//! - [`application`]: Application entity, status lifecycle, and its table

pub mod application;
pub mod error;
pub mod job;

pub use application::{
    Application, ApplicationId, ApplicationSortField, ApplicationStatus, ApplicantId, CvSummary,
};
pub use error::{Error, Result};
pub use job::{EmploymentType, Job, JobId, JobSortField, JobStatus, SalaryRange};
