use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::auth::{AccountType, Identity, Role};
use super::domain::{
    ApplicationId, ApplicationRecord, CompanyId, CompanyRecord, InternshipId, InternshipRecord,
    JobId, JobRecord, PositionKind, PositionSummary, PostingStatus, StudentId, StudentRecord,
    next_id,
};
use super::payload::{
    AccountView, ApplicationRequest, ApplicationUpdate, ApplicationView, AuthResponse,
    CompanyUpdate, InternshipApplicationRequest, InternshipUpdate, JobListing, JobUpdate,
    LoginRequest, NewCompany, NewInternship, NewJob, NewStudent, RegisterRequest,
    StudentApplications, StudentQuery, StudentUpdate,
};
use super::repository::{PortalStore, StoreError};
use super::submission::{
    ApplicationSubmissionWorkflow, SubmissionError, SubmissionOutcome, SubmissionRequest,
    ValidationError,
};
use crate::gamification::AwardEvent;

/// Error raised by the portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("{0}")]
    Validation(String),
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("unauthorized access")]
    Unauthenticated,
    #[error("{0}")]
    NotOwner(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for PortalError {
    fn from(value: ValidationError) -> Self {
        Self::Submission(SubmissionError::Validation(value))
    }
}

/// Collects missing required fields so one error names all of them.
#[derive(Default)]
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn take(&mut self, field: &'static str, value: Option<String>) -> String {
        match value.map(|value| value.trim().to_string()) {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    fn check(self) -> Result<(), PortalError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(PortalError::Validation(format!(
                "missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Portal facade: CRUD over every collection, account access, and application submission.
pub struct PortalService<S> {
    store: Arc<S>,
    workflow: ApplicationSubmissionWorkflow<S, S>,
}

impl<S> PortalService<S>
where
    S: PortalStore + 'static,
{
    pub fn new(store: Arc<S>, award: AwardEvent) -> Self {
        let workflow = ApplicationSubmissionWorkflow::new(store.clone(), store.clone(), award);
        Self { store, workflow }
    }

    pub fn standard(store: Arc<S>) -> Self {
        let workflow = ApplicationSubmissionWorkflow::standard(store.clone(), store.clone());
        Self { store, workflow }
    }

    // Accounts

    pub fn register(&self, request: RegisterRequest) -> Result<AuthResponse, PortalError> {
        let mut required = Required::default();
        let name = required.take("name", request.name);
        let email = required.take("email", request.email);
        let password = required.take("password", request.password);
        let account_type = required.take("type", request.account_type);
        required.check()?;

        match AccountType::parse(&account_type) {
            Some(AccountType::Student) => {
                let student = self
                    .store
                    .insert_student(StudentRecord::new(name, email, password))?;
                info!(student_id = %student.id, "student registered");
                Ok(AuthResponse {
                    message: "Student registered successfully".to_string(),
                    user: AccountView {
                        id: student.id.0,
                        name: student.name,
                        role: Role::Student,
                    },
                })
            }
            Some(AccountType::Company) => {
                let company = self
                    .store
                    .insert_company(CompanyRecord::new(name, email, password))?;
                info!(company_id = %company.id, "company registered");
                Ok(AuthResponse {
                    message: "Company registered successfully".to_string(),
                    user: AccountView {
                        id: company.id.0,
                        name: company.name,
                        role: Role::Company,
                    },
                })
            }
            None => Err(PortalError::Validation("invalid user type".to_string())),
        }
    }

    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse, PortalError> {
        let mut required = Required::default();
        let email = required.take("email", request.email);
        let password = required.take("password", request.password);
        let account_type = required.take("type", request.account_type);
        required.check()?;

        let account_type = AccountType::parse(&account_type)
            .ok_or_else(|| PortalError::Validation("invalid user type".to_string()))?;

        let user = match account_type {
            AccountType::Student => self
                .store
                .find_student_by_email(&email)?
                .filter(|student| student.password == password)
                .map(|student| AccountView {
                    id: student.id.0,
                    name: student.name,
                    role: Role::Student,
                }),
            AccountType::Company => self
                .store
                .find_company_by_email(&email)?
                .filter(|company| company.password == password)
                .map(|company| AccountView {
                    id: company.id.0,
                    name: company.name,
                    role: Role::Company,
                }),
        };

        let user = user.ok_or(PortalError::InvalidCredentials)?;
        Ok(AuthResponse {
            message: "Login Successful".to_string(),
            user,
        })
    }

    // Students

    pub fn create_student(&self, payload: NewStudent) -> Result<StudentRecord, PortalError> {
        let mut required = Required::default();
        let name = required.take("name", payload.name);
        let email = required.take("email", payload.email);
        let password = required.take("password", payload.password);
        required.check()?;

        let mut record = StudentRecord::new(name, email, password);
        if let Some(role) = payload.role {
            record.role = role;
        }
        Ok(self.store.insert_student(record)?)
    }

    pub fn list_students(&self) -> Result<Vec<StudentRecord>, PortalError> {
        Ok(self.store.list_students()?)
    }

    pub fn get_student(&self, id: &StudentId) -> Result<StudentRecord, PortalError> {
        self.store
            .find_student(id)?
            .ok_or(PortalError::NotFound { entity: "student" })
    }

    pub fn update_student(
        &self,
        id: &StudentId,
        update: StudentUpdate,
    ) -> Result<StudentRecord, PortalError> {
        let mut record = self.get_student(id)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(password) = update.password {
            record.password = password;
        }
        if let Some(role) = update.role {
            record.role = role;
        }
        if let Some(points) = update.points {
            record.points = points;
        }
        if let Some(badges) = update.badges {
            record.badges = badges;
        }
        self.store.save_student(record.clone())?;
        Ok(record)
    }

    pub fn delete_student(&self, id: &StudentId) -> Result<(), PortalError> {
        self.store
            .delete_student(id)?
            .map(|_| ())
            .ok_or(PortalError::NotFound { entity: "student" })
    }

    // Companies

    pub fn create_company(&self, payload: NewCompany) -> Result<CompanyRecord, PortalError> {
        let mut required = Required::default();
        let name = required.take("name", payload.name);
        let email = required.take("email", payload.email);
        let password = required.take("password", payload.password);
        required.check()?;

        let mut record = CompanyRecord::new(name, email, password);
        if let Some(role) = payload.role {
            record.role = role;
        }
        record.industry = payload.industry;
        Ok(self.store.insert_company(record)?)
    }

    pub fn list_companies(&self) -> Result<Vec<CompanyRecord>, PortalError> {
        Ok(self.store.list_companies()?)
    }

    pub fn get_company(&self, id: &CompanyId) -> Result<CompanyRecord, PortalError> {
        self.store
            .find_company(id)?
            .ok_or(PortalError::NotFound { entity: "company" })
    }

    pub fn update_company(
        &self,
        id: &CompanyId,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, PortalError> {
        let mut record = self.get_company(id)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(password) = update.password {
            record.password = password;
        }
        if let Some(role) = update.role {
            record.role = role;
        }
        if update.industry.is_some() {
            record.industry = update.industry;
        }
        self.store.save_company(record.clone())?;
        Ok(record)
    }

    pub fn delete_company(&self, id: &CompanyId) -> Result<(), PortalError> {
        self.store
            .delete_company(id)?
            .map(|_| ())
            .ok_or(PortalError::NotFound { entity: "company" })
    }

    // Jobs

    pub fn create_job(&self, payload: NewJob) -> Result<JobRecord, PortalError> {
        let mut required = Required::default();
        let title = required.take("title", payload.title);
        let description = required.take("description", payload.description);
        let company_name = required.take("companyName", payload.company_name);
        let company_id = required.take("companyId", payload.company_id);
        let category = required.take("category", payload.category);
        let salary = required.take("salary", payload.salary);
        if payload.job_type.is_none() {
            required.missing.push("type");
        }
        required.check()?;
        let job_type = payload
            .job_type
            .ok_or_else(|| PortalError::Validation("missing required fields: type".to_string()))?;

        let now = Utc::now();
        let record = JobRecord {
            id: JobId(next_id("job")),
            title,
            description,
            company_name,
            company_id: CompanyId(company_id),
            category,
            job_type,
            salary,
            application_deadline: payload.application_deadline,
            status: payload.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        Ok(self.store.insert_job(record)?)
    }

    pub fn list_jobs(&self) -> Result<Vec<JobListing>, PortalError> {
        let jobs = self.store.list_jobs()?;
        jobs.into_iter()
            .map(|job| -> Result<JobListing, PortalError> {
                let company = self
                    .store
                    .find_company(&job.company_id)?
                    .as_ref()
                    .map(Into::into);
                Ok(JobListing { job, company })
            })
            .collect()
    }

    /// Companies see the jobs they own; admins see every job.
    pub fn jobs_for(&self, identity: &Identity) -> Result<Vec<JobRecord>, PortalError> {
        let jobs = self.store.list_jobs()?;
        match identity.role {
            Role::Admin => Ok(jobs),
            Role::Company => Ok(jobs
                .into_iter()
                .filter(|job| job.company_id.0 == identity.id)
                .collect()),
            Role::Student => Err(PortalError::Forbidden(
                "only companies can list their jobs".to_string(),
            )),
        }
    }

    pub fn get_job(&self, id: &JobId) -> Result<JobRecord, PortalError> {
        self.store
            .find_job(id)?
            .ok_or(PortalError::NotFound { entity: "job" })
    }

    pub fn update_job(
        &self,
        id: &JobId,
        identity: &Identity,
        update: JobUpdate,
    ) -> Result<JobRecord, PortalError> {
        let mut job = self.get_job(id)?;
        if identity.role == Role::Company && job.company_id.0 != identity.id {
            return Err(PortalError::NotOwner(
                "unauthorized to edit this job".to_string(),
            ));
        }

        if let Some(title) = update.title {
            job.title = title;
        }
        if let Some(description) = update.description {
            job.description = description;
        }
        if let Some(category) = update.category {
            job.category = category;
        }
        if let Some(job_type) = update.job_type {
            job.job_type = job_type;
        }
        if let Some(salary) = update.salary {
            job.salary = salary;
        }
        if let Some(status) = update.status {
            job.status = status;
        }
        job.updated_at = Utc::now();

        self.store.save_job(job.clone())?;
        Ok(job)
    }

    pub fn delete_job(&self, id: &JobId) -> Result<(), PortalError> {
        self.store
            .delete_job(id)?
            .map(|_| ())
            .ok_or(PortalError::NotFound { entity: "job" })
    }

    // Internships

    pub fn create_internship(
        &self,
        payload: NewInternship,
    ) -> Result<InternshipRecord, PortalError> {
        let mut required = Required::default();
        let title = required.take("title", payload.title);
        let company = required.take("companyName", payload.company_name);
        let description = required.take("description", payload.description);
        required.check()?;

        let record = InternshipRecord {
            id: InternshipId(next_id("int")),
            title,
            company,
            description,
            category: payload.category,
            kind: payload
                .kind
                .filter(|kind| !kind.trim().is_empty())
                .unwrap_or_else(|| "Internship".to_string()),
            salary: payload.salary,
            application_deadline: payload.application_deadline,
            status: PostingStatus::default(),
        };
        Ok(self.store.insert_internship(record)?)
    }

    pub fn list_internships(&self) -> Result<Vec<InternshipRecord>, PortalError> {
        Ok(self.store.list_internships()?)
    }

    pub fn get_internship(&self, id: &InternshipId) -> Result<InternshipRecord, PortalError> {
        self.store
            .find_internship(id)?
            .ok_or(PortalError::NotFound {
                entity: "internship",
            })
    }

    pub fn update_internship(
        &self,
        id: &InternshipId,
        update: InternshipUpdate,
    ) -> Result<InternshipRecord, PortalError> {
        let mut record = self.get_internship(id)?;
        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(company) = update.company {
            record.company = company;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if update.category.is_some() {
            record.category = update.category;
        }
        if let Some(kind) = update.kind {
            record.kind = kind;
        }
        if update.salary.is_some() {
            record.salary = update.salary;
        }
        if update.application_deadline.is_some() {
            record.application_deadline = update.application_deadline;
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        self.store.save_internship(record.clone())?;
        Ok(record)
    }

    pub fn delete_internship(&self, id: &InternshipId) -> Result<(), PortalError> {
        self.store
            .delete_internship(id)?
            .map(|_| ())
            .ok_or(PortalError::NotFound {
                entity: "internship",
            })
    }

    /// Applies to an internship; unlike jobs, the posting must exist.
    pub fn apply_internship(
        &self,
        payload: InternshipApplicationRequest,
    ) -> Result<SubmissionOutcome, PortalError> {
        let request = SubmissionRequest {
            student_id: payload.student_id,
            position_id: payload.internship_id,
            kind: PositionKind::Internship,
        };
        let (_, position) = request.validate()?;
        self.get_internship(&InternshipId(position.id))?;
        Ok(self.workflow.submit(request)?)
    }

    // Applications

    pub fn submit_application(
        &self,
        payload: ApplicationRequest,
    ) -> Result<SubmissionOutcome, PortalError> {
        Ok(self.workflow.submit(SubmissionRequest {
            student_id: payload.student_id,
            position_id: payload.job_id,
            kind: PositionKind::Job,
        })?)
    }

    pub fn list_applications(&self) -> Result<Vec<ApplicationView>, PortalError> {
        self.store
            .list_applications()?
            .into_iter()
            .map(|application| self.view(application))
            .collect()
    }

    pub fn get_application(&self, id: &ApplicationId) -> Result<ApplicationView, PortalError> {
        let application = self
            .store
            .fetch_application(id)?
            .ok_or(PortalError::NotFound {
                entity: "application",
            })?;
        self.view(application)
    }

    pub fn applications_for_student(
        &self,
        query: StudentQuery,
    ) -> Result<StudentApplications, PortalError> {
        let student_id = query
            .student_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| PortalError::Validation("studentId is required".to_string()))?;

        let applications = self
            .store
            .applications_for_student(&StudentId(student_id))?
            .into_iter()
            .map(|application| self.view(application))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StudentApplications { applications })
    }

    pub fn update_application(
        &self,
        id: &ApplicationId,
        update: ApplicationUpdate,
    ) -> Result<ApplicationRecord, PortalError> {
        let mut record = self
            .store
            .fetch_application(id)?
            .ok_or(PortalError::NotFound {
                entity: "application",
            })?;
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(submitted) = update.submission_date {
            record.submission_date = submitted;
        }
        self.store.update_application(record.clone())?;
        Ok(record)
    }

    pub fn delete_application(&self, id: &ApplicationId) -> Result<(), PortalError> {
        self.store
            .delete_application(id)?
            .map(|_| ())
            .ok_or(PortalError::NotFound {
                entity: "application",
            })
    }

    fn view(&self, application: ApplicationRecord) -> Result<ApplicationView, PortalError> {
        let student = self
            .store
            .find_student(&application.student_id)?
            .map(|student| student.summary());
        let position = match application.position_kind {
            PositionKind::Job => self
                .store
                .find_job(&JobId(application.job_id.clone()))?
                .as_ref()
                .map(PositionSummary::from),
            PositionKind::Internship => self
                .store
                .find_internship(&InternshipId(application.job_id.clone()))?
                .as_ref()
                .map(PositionSummary::from),
        };
        Ok(ApplicationView {
            application,
            student,
            position,
        })
    }
}
