//! Job and internship portal: records, storage seams, the application submission workflow,
//! and the HTTP surface built on top of them.

pub mod auth;
pub mod domain;
pub mod memory;
pub mod payload;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use auth::{Identity, Role};
pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, CompanyId, CompanyRecord, InternshipId,
    InternshipRecord, JobId, JobRecord, JobType, PositionKind, PositionRef, PostingStatus,
    StudentId, StudentRecord,
};
pub use memory::MemoryStore;
pub use repository::{
    ApplicationStore, CompanyStore, InternshipStore, JobStore, PortalStore, StoreError,
    StudentStore,
};
pub use router::portal_router;
pub use service::{PortalError, PortalService};
pub use submission::{
    ApplicationSubmissionWorkflow, AwardStatus, SubmissionError, SubmissionOutcome,
    SubmissionRequest, ValidationError,
};
