use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    ApplicationId, ApplicationRecord, CompanyId, CompanyRecord, InternshipId, InternshipRecord,
    JobId, JobRecord, StudentId, StudentRecord,
};
use super::repository::{
    ApplicationStore, CompanyStore, InternshipStore, JobStore, StoreError, StudentStore,
};

/// In-process document store. Each collection is guarded separately, so a single write is
/// atomic but nothing spans collections.
#[derive(Default, Clone)]
pub struct MemoryStore {
    students: Arc<Mutex<BTreeMap<StudentId, StudentRecord>>>,
    companies: Arc<Mutex<BTreeMap<CompanyId, CompanyRecord>>>,
    jobs: Arc<Mutex<BTreeMap<JobId, JobRecord>>>,
    internships: Arc<Mutex<BTreeMap<InternshipId, InternshipRecord>>>,
    applications: Arc<Mutex<BTreeMap<ApplicationId, ApplicationRecord>>>,
}

fn lock<'a, K, V>(
    collection: &'a Mutex<BTreeMap<K, V>>,
    name: &str,
) -> Result<MutexGuard<'a, BTreeMap<K, V>>, StoreError> {
    collection
        .lock()
        .map_err(|_| StoreError::Unavailable(format!("{name} collection poisoned")))
}

fn insert_new<K: Ord + Clone, V: Clone>(
    guard: &mut BTreeMap<K, V>,
    key: &K,
    record: V,
) -> Result<V, StoreError> {
    if guard.contains_key(key) {
        return Err(StoreError::Conflict("duplicate id".to_string()));
    }
    guard.insert(key.clone(), record.clone());
    Ok(record)
}

fn replace<K: Ord + Clone, V>(
    guard: &mut BTreeMap<K, V>,
    key: &K,
    record: V,
) -> Result<(), StoreError> {
    match guard.get_mut(key) {
        Some(slot) => {
            *slot = record;
            Ok(())
        }
        None => Err(StoreError::NotFound),
    }
}

impl StudentStore for MemoryStore {
    fn insert_student(&self, record: StudentRecord) -> Result<StudentRecord, StoreError> {
        let mut guard = lock(&self.students, "students")?;
        if guard.values().any(|existing| existing.email == record.email) {
            return Err(StoreError::Conflict(format!("email {}", record.email)));
        }
        insert_new(&mut guard, &record.id.clone(), record)
    }

    fn find_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        Ok(lock(&self.students, "students")?.get(id).cloned())
    }

    fn find_student_by_email(&self, email: &str) -> Result<Option<StudentRecord>, StoreError> {
        Ok(lock(&self.students, "students")?
            .values()
            .find(|record| record.email == email)
            .cloned())
    }

    fn list_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(lock(&self.students, "students")?.values().cloned().collect())
    }

    fn save_student(&self, record: StudentRecord) -> Result<(), StoreError> {
        let mut guard = lock(&self.students, "students")?;
        if guard
            .values()
            .any(|existing| existing.email == record.email && existing.id != record.id)
        {
            return Err(StoreError::Conflict(format!("email {}", record.email)));
        }
        replace(&mut guard, &record.id.clone(), record)
    }

    fn delete_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, StoreError> {
        Ok(lock(&self.students, "students")?.remove(id))
    }
}

impl CompanyStore for MemoryStore {
    fn insert_company(&self, record: CompanyRecord) -> Result<CompanyRecord, StoreError> {
        let mut guard = lock(&self.companies, "companies")?;
        if guard.values().any(|existing| existing.email == record.email) {
            return Err(StoreError::Conflict(format!("email {}", record.email)));
        }
        insert_new(&mut guard, &record.id.clone(), record)
    }

    fn find_company(&self, id: &CompanyId) -> Result<Option<CompanyRecord>, StoreError> {
        Ok(lock(&self.companies, "companies")?.get(id).cloned())
    }

    fn find_company_by_email(&self, email: &str) -> Result<Option<CompanyRecord>, StoreError> {
        Ok(lock(&self.companies, "companies")?
            .values()
            .find(|record| record.email == email)
            .cloned())
    }

    fn list_companies(&self) -> Result<Vec<CompanyRecord>, StoreError> {
        Ok(lock(&self.companies, "companies")?.values().cloned().collect())
    }

    fn save_company(&self, record: CompanyRecord) -> Result<(), StoreError> {
        let mut guard = lock(&self.companies, "companies")?;
        if guard
            .values()
            .any(|existing| existing.email == record.email && existing.id != record.id)
        {
            return Err(StoreError::Conflict(format!("email {}", record.email)));
        }
        replace(&mut guard, &record.id.clone(), record)
    }

    fn delete_company(&self, id: &CompanyId) -> Result<Option<CompanyRecord>, StoreError> {
        Ok(lock(&self.companies, "companies")?.remove(id))
    }
}

impl JobStore for MemoryStore {
    fn insert_job(&self, record: JobRecord) -> Result<JobRecord, StoreError> {
        let mut guard = lock(&self.jobs, "jobs")?;
        insert_new(&mut guard, &record.id.clone(), record)
    }

    fn find_job(&self, id: &JobId) -> Result<Option<JobRecord>, StoreError> {
        Ok(lock(&self.jobs, "jobs")?.get(id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        Ok(lock(&self.jobs, "jobs")?.values().cloned().collect())
    }

    fn save_job(&self, record: JobRecord) -> Result<(), StoreError> {
        let mut guard = lock(&self.jobs, "jobs")?;
        replace(&mut guard, &record.id.clone(), record)
    }

    fn delete_job(&self, id: &JobId) -> Result<Option<JobRecord>, StoreError> {
        Ok(lock(&self.jobs, "jobs")?.remove(id))
    }
}

impl InternshipStore for MemoryStore {
    fn insert_internship(
        &self,
        record: InternshipRecord,
    ) -> Result<InternshipRecord, StoreError> {
        let mut guard = lock(&self.internships, "internships")?;
        insert_new(&mut guard, &record.id.clone(), record)
    }

    fn find_internship(&self, id: &InternshipId) -> Result<Option<InternshipRecord>, StoreError> {
        Ok(lock(&self.internships, "internships")?.get(id).cloned())
    }

    fn list_internships(&self) -> Result<Vec<InternshipRecord>, StoreError> {
        Ok(lock(&self.internships, "internships")?
            .values()
            .cloned()
            .collect())
    }

    fn save_internship(&self, record: InternshipRecord) -> Result<(), StoreError> {
        let mut guard = lock(&self.internships, "internships")?;
        replace(&mut guard, &record.id.clone(), record)
    }

    fn delete_internship(
        &self,
        id: &InternshipId,
    ) -> Result<Option<InternshipRecord>, StoreError> {
        Ok(lock(&self.internships, "internships")?.remove(id))
    }
}

impl ApplicationStore for MemoryStore {
    fn insert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, StoreError> {
        let mut guard = lock(&self.applications, "applications")?;
        insert_new(&mut guard, &record.id.clone(), record)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(lock(&self.applications, "applications")?.get(id).cloned())
    }

    fn list_applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(lock(&self.applications, "applications")?
            .values()
            .cloned()
            .collect())
    }

    fn applications_for_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(lock(&self.applications, "applications")?
            .values()
            .filter(|record| &record.student_id == student)
            .cloned()
            .collect())
    }

    fn update_application(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        let mut guard = lock(&self.applications, "applications")?;
        replace(&mut guard, &record.id.clone(), record)
    }

    fn delete_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(lock(&self.applications, "applications")?.remove(id))
    }
}
