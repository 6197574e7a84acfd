use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::portal::domain::{
    ApplicationId, ApplicationRecord, StudentId, StudentRecord,
};
use crate::portal::memory::MemoryStore;
use crate::portal::repository::{ApplicationStore, StoreError, StudentStore};
use crate::portal::service::PortalService;
use crate::portal::submission::ApplicationSubmissionWorkflow;

pub(super) fn student(name: &str, points: u64) -> StudentRecord {
    let mut record = StudentRecord::new(
        name.to_string(),
        format!("{}@example.edu", name.to_ascii_lowercase()),
        "hunter2".to_string(),
    );
    record.points = points;
    record
}

pub(super) fn seeded_student(store: &MemoryStore, name: &str, points: u64) -> StudentRecord {
    store
        .insert_student(student(name, points))
        .expect("student inserted")
}

pub(super) fn build_workflow() -> (
    ApplicationSubmissionWorkflow<MemoryStore, MemoryStore>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let workflow = ApplicationSubmissionWorkflow::standard(store.clone(), store.clone());
    (workflow, store)
}

pub(super) fn build_service() -> (Arc<PortalService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(PortalService::standard(store.clone()));
    (service, store)
}

/// Panics on any access; proves a code path never reached storage.
pub(super) struct UntouchableStore;

impl ApplicationStore for UntouchableStore {
    fn insert_application(&self, _: ApplicationRecord) -> Result<ApplicationRecord, StoreError> {
        panic!("application store touched")
    }
    fn fetch_application(&self, _: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        panic!("application store touched")
    }
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        panic!("application store touched")
    }
    fn applications_for_student(&self, _: &StudentId) -> Result<Vec<ApplicationRecord>, StoreError> {
        panic!("application store touched")
    }
    fn update_application(&self, _: ApplicationRecord) -> Result<(), StoreError> {
        panic!("application store touched")
    }
    fn delete_application(&self, _: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        panic!("application store touched")
    }
}

impl StudentStore for UntouchableStore {
    fn insert_student(&self, _: StudentRecord) -> Result<StudentRecord, StoreError> {
        panic!("student store touched")
    }
    fn find_student(&self, _: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        panic!("student store touched")
    }
    fn find_student_by_email(&self, _: &str) -> Result<Option<StudentRecord>, StoreError> {
        panic!("student store touched")
    }
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        panic!("student store touched")
    }
    fn save_student(&self, _: StudentRecord) -> Result<(), StoreError> {
        panic!("student store touched")
    }
    fn delete_student(&self, _: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        panic!("student store touched")
    }
}

/// Application store whose writes always fail.
pub(super) struct OfflineApplications;

impl ApplicationStore for OfflineApplications {
    fn insert_application(&self, _: ApplicationRecord) -> Result<ApplicationRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
    fn fetch_application(&self, _: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
    fn applications_for_student(&self, _: &StudentId) -> Result<Vec<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
    fn update_application(&self, _: ApplicationRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
    fn delete_application(&self, _: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum StudentFault {
    Lookup,
    Save,
}

/// Student store delegating to memory except for one failing operation.
pub(super) struct FaultyStudents {
    pub(super) inner: MemoryStore,
    pub(super) fault: StudentFault,
}

impl StudentStore for FaultyStudents {
    fn insert_student(&self, record: StudentRecord) -> Result<StudentRecord, StoreError> {
        self.inner.insert_student(record)
    }
    fn find_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        if self.fault == StudentFault::Lookup {
            return Err(StoreError::Unavailable("replica lagging".to_string()));
        }
        self.inner.find_student(id)
    }
    fn find_student_by_email(&self, email: &str) -> Result<Option<StudentRecord>, StoreError> {
        self.inner.find_student_by_email(email)
    }
    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        self.inner.list_students()
    }
    fn save_student(&self, record: StudentRecord) -> Result<(), StoreError> {
        if self.fault == StudentFault::Save {
            return Err(StoreError::Unavailable("write rejected".to_string()));
        }
        self.inner.save_student(record)
    }
    fn delete_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        self.inner.delete_student(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
