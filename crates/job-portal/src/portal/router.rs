use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::auth::Identity;
use super::domain::{
    ApplicationId, ApplicationRecord, CompanyId, CompanyRecord, InternshipId, InternshipRecord,
    JobId, JobRecord, StudentId, StudentRecord,
};
use super::payload::{
    Acknowledgement, ApplicationRequest, ApplicationUpdate, ApplicationView, AuthResponse,
    CompanyUpdate, InternshipApplicationRequest, InternshipUpdate, JobListing, JobUpdate,
    LoginRequest, NewCompany, NewInternship, NewJob, NewStudent, RegisterRequest,
    StudentApplications, StudentQuery, StudentUpdate,
};
use super::repository::{PortalStore, StoreError};
use super::service::{PortalError, PortalService};
use super::submission::{SubmissionError, SubmissionOutcome};

type Shared<S> = State<Arc<PortalService<S>>>;
type Created<T> = Result<(StatusCode, Json<T>), PortalError>;
type Found<T> = Result<Json<T>, PortalError>;

impl PortalError {
    pub fn status(&self) -> StatusCode {
        match self {
            PortalError::Validation(_)
            | PortalError::InvalidCredentials
            | PortalError::Submission(SubmissionError::Validation(_)) => StatusCode::BAD_REQUEST,
            PortalError::NotFound { .. } | PortalError::Store(StoreError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            PortalError::Unauthenticated | PortalError::NotOwner(_) => StatusCode::UNAUTHORIZED,
            PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
            PortalError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            PortalError::Store(StoreError::Unavailable(_))
            | PortalError::Submission(SubmissionError::Creation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Router builder exposing the portal's REST surface.
pub fn portal_router<S>(service: Arc<PortalService<S>>) -> Router
where
    S: PortalStore + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/auth/register", post(register_handler::<S>))
        .route("/auth/login", post(login_handler::<S>))
        .route(
            "/students",
            post(create_student_handler::<S>).get(list_students_handler::<S>),
        )
        .route(
            "/students/:id",
            get(get_student_handler::<S>)
                .put(update_student_handler::<S>)
                .delete(delete_student_handler::<S>),
        )
        .route(
            "/companies",
            post(create_company_handler::<S>).get(list_companies_handler::<S>),
        )
        .route(
            "/companies/:id",
            get(get_company_handler::<S>)
                .put(update_company_handler::<S>)
                .delete(delete_company_handler::<S>),
        )
        .route(
            "/jobs",
            post(create_job_handler::<S>).get(list_jobs_handler::<S>),
        )
        .route("/jobs/my-jobs", get(my_jobs_handler::<S>))
        .route(
            "/jobs/:id",
            get(get_job_handler::<S>)
                .put(update_job_handler::<S>)
                .delete(delete_job_handler::<S>),
        )
        .route(
            "/internships",
            post(create_internship_handler::<S>).get(list_internships_handler::<S>),
        )
        .route("/internships/apply", post(apply_internship_handler::<S>))
        .route(
            "/internships/:id",
            get(get_internship_handler::<S>)
                .put(update_internship_handler::<S>)
                .delete(delete_internship_handler::<S>),
        )
        .route(
            "/applications",
            post(submit_application_handler::<S>).get(list_applications_handler::<S>),
        )
        .route(
            "/applications/student",
            get(student_applications_handler::<S>),
        )
        .route(
            "/applications/:id",
            get(get_application_handler::<S>)
                .put(update_application_handler::<S>)
                .delete(delete_application_handler::<S>),
        )
        .with_state(service)
}

async fn banner() -> Html<&'static str> {
    Html("<h1>Internship & Job Portal API Running</h1>")
}

pub(crate) async fn register_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<RegisterRequest>,
) -> Created<AuthResponse> {
    let response = service.register(payload)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub(crate) async fn login_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<LoginRequest>,
) -> Found<AuthResponse> {
    Ok(Json(service.login(payload)?))
}

async fn create_student_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<NewStudent>,
) -> Created<StudentRecord> {
    Ok((StatusCode::CREATED, Json(service.create_student(payload)?)))
}

async fn list_students_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
) -> Found<Vec<StudentRecord>> {
    Ok(Json(service.list_students()?))
}

async fn get_student_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<StudentRecord> {
    Ok(Json(service.get_student(&StudentId(id))?))
}

async fn update_student_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    Json(update): Json<StudentUpdate>,
) -> Found<StudentRecord> {
    Ok(Json(service.update_student(&StudentId(id), update)?))
}

async fn delete_student_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<Acknowledgement> {
    service.delete_student(&StudentId(id))?;
    Ok(Json(Acknowledgement::new("Student deleted successfully")))
}

async fn create_company_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<NewCompany>,
) -> Created<CompanyRecord> {
    Ok((StatusCode::CREATED, Json(service.create_company(payload)?)))
}

async fn list_companies_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
) -> Found<Vec<CompanyRecord>> {
    Ok(Json(service.list_companies()?))
}

async fn get_company_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<CompanyRecord> {
    Ok(Json(service.get_company(&CompanyId(id))?))
}

async fn update_company_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    Json(update): Json<CompanyUpdate>,
) -> Found<CompanyRecord> {
    Ok(Json(service.update_company(&CompanyId(id), update)?))
}

async fn delete_company_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<Acknowledgement> {
    service.delete_company(&CompanyId(id))?;
    Ok(Json(Acknowledgement::new("Company deleted successfully")))
}

async fn create_job_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<NewJob>,
) -> Created<JobRecord> {
    Ok((StatusCode::CREATED, Json(service.create_job(payload)?)))
}

async fn list_jobs_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
) -> Found<Vec<JobListing>> {
    Ok(Json(service.list_jobs()?))
}

async fn my_jobs_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    identity: Identity,
) -> Found<Vec<JobRecord>> {
    Ok(Json(service.jobs_for(&identity)?))
}

async fn get_job_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<JobRecord> {
    Ok(Json(service.get_job(&JobId(id))?))
}

async fn update_job_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    identity: Identity,
    Json(update): Json<JobUpdate>,
) -> Found<JobRecord> {
    Ok(Json(service.update_job(&JobId(id), &identity, update)?))
}

async fn delete_job_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<Acknowledgement> {
    service.delete_job(&JobId(id))?;
    Ok(Json(Acknowledgement::new("Job deleted successfully")))
}

async fn create_internship_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<NewInternship>,
) -> Created<InternshipRecord> {
    Ok((StatusCode::CREATED, Json(service.create_internship(payload)?)))
}

async fn list_internships_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
) -> Found<Vec<InternshipRecord>> {
    Ok(Json(service.list_internships()?))
}

async fn get_internship_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<InternshipRecord> {
    Ok(Json(service.get_internship(&InternshipId(id))?))
}

async fn update_internship_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    Json(update): Json<InternshipUpdate>,
) -> Found<InternshipRecord> {
    Ok(Json(service.update_internship(&InternshipId(id), update)?))
}

async fn delete_internship_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<Acknowledgement> {
    service.delete_internship(&InternshipId(id))?;
    Ok(Json(Acknowledgement::new("Internship deleted successfully")))
}

pub(crate) async fn apply_internship_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<InternshipApplicationRequest>,
) -> Created<SubmissionOutcome> {
    Ok((StatusCode::CREATED, Json(service.apply_internship(payload)?)))
}

pub(crate) async fn submit_application_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Json(payload): Json<ApplicationRequest>,
) -> Created<SubmissionOutcome> {
    Ok((StatusCode::CREATED, Json(service.submit_application(payload)?)))
}

async fn list_applications_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
) -> Found<Vec<ApplicationView>> {
    Ok(Json(service.list_applications()?))
}

async fn student_applications_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Query(query): Query<StudentQuery>,
) -> Found<StudentApplications> {
    Ok(Json(service.applications_for_student(query)?))
}

async fn get_application_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<ApplicationView> {
    Ok(Json(service.get_application(&ApplicationId(id))?))
}

async fn update_application_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    Json(update): Json<ApplicationUpdate>,
) -> Found<ApplicationRecord> {
    Ok(Json(service.update_application(&ApplicationId(id), update)?))
}

async fn delete_application_handler<S: PortalStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Found<Acknowledgement> {
    service.delete_application(&ApplicationId(id))?;
    Ok(Json(Acknowledgement::new("Application deleted successfully")))
}
