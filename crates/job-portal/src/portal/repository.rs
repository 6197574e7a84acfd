//! Storage seams for the portal's document collections.
//!
//! Each collection gets its own trait so the submission workflow can depend on exactly the two
//! it touches. Method names carry the collection so one store type can implement them all.

use super::domain::{
    ApplicationId, ApplicationRecord, CompanyId, CompanyRecord, InternshipId, InternshipRecord,
    JobId, JobRecord, StudentId, StudentRecord,
};

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub trait StudentStore: Send + Sync {
    fn insert_student(&self, record: StudentRecord) -> Result<StudentRecord, StoreError>;
    fn find_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError>;
    fn find_student_by_email(&self, email: &str) -> Result<Option<StudentRecord>, StoreError>;
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError>;
    /// Overwrites an existing record; `NotFound` if it was never inserted.
    fn save_student(&self, record: StudentRecord) -> Result<(), StoreError>;
    fn delete_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError>;
}

pub trait ApplicationStore: Send + Sync {
    fn insert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, StoreError>;
    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError>;
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError>;
    fn applications_for_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<ApplicationRecord>, StoreError>;
    fn update_application(&self, record: ApplicationRecord) -> Result<(), StoreError>;
    fn delete_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError>;
}

pub trait CompanyStore: Send + Sync {
    fn insert_company(&self, record: CompanyRecord) -> Result<CompanyRecord, StoreError>;
    fn find_company(&self, id: &CompanyId) -> Result<Option<CompanyRecord>, StoreError>;
    fn find_company_by_email(&self, email: &str) -> Result<Option<CompanyRecord>, StoreError>;
    fn list_companies(&self) -> Result<Vec<CompanyRecord>, StoreError>;
    fn save_company(&self, record: CompanyRecord) -> Result<(), StoreError>;
    fn delete_company(&self, id: &CompanyId) -> Result<Option<CompanyRecord>, StoreError>;
}

pub trait JobStore: Send + Sync {
    fn insert_job(&self, record: JobRecord) -> Result<JobRecord, StoreError>;
    fn find_job(&self, id: &JobId) -> Result<Option<JobRecord>, StoreError>;
    fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError>;
    fn save_job(&self, record: JobRecord) -> Result<(), StoreError>;
    fn delete_job(&self, id: &JobId) -> Result<Option<JobRecord>, StoreError>;
}

pub trait InternshipStore: Send + Sync {
    fn insert_internship(&self, record: InternshipRecord)
        -> Result<InternshipRecord, StoreError>;
    fn find_internship(&self, id: &InternshipId) -> Result<Option<InternshipRecord>, StoreError>;
    fn list_internships(&self) -> Result<Vec<InternshipRecord>, StoreError>;
    fn save_internship(&self, record: InternshipRecord) -> Result<(), StoreError>;
    fn delete_internship(
        &self,
        id: &InternshipId,
    ) -> Result<Option<InternshipRecord>, StoreError>;
}

/// Every collection the portal service reads and writes.
pub trait PortalStore:
    StudentStore + ApplicationStore + CompanyStore + JobStore + InternshipStore
{
}

impl<T> PortalStore for T where
    T: StudentStore + ApplicationStore + CompanyStore + JobStore + InternshipStore
{
}
