//! Request bodies accepted by the portal endpoints and the joined views it returns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::auth::Role;
use super::domain::{
    ApplicationRecord, ApplicationStatus, CompanyId, CompanyRecord, CompanyRole, JobRecord,
    JobType, PositionSummary, PostingStatus, StudentRole, StudentSummary,
};
use crate::gamification::BadgeSet;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipApplicationRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub internship_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    #[serde(default)]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdate {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub submission_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<StudentRole>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<StudentRole>,
    #[serde(default)]
    pub points: Option<u64>,
    #[serde(default)]
    pub badges: Option<BadgeSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompany {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<CompanyRole>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<CompanyRole>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<PostingStatus>,
}

/// Fields a company may change on an existing job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub status: Option<PostingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInternship {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<PostingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: AccountView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl From<&CompanyRecord> for CompanySummary {
    fn from(company: &CompanyRecord) -> Self {
        Self {
            id: company.id.clone(),
            name: company.name.clone(),
            industry: company.industry.clone(),
        }
    }
}

/// Job joined with its owning company, when that company still exists.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: JobRecord,
    pub company: Option<CompanySummary>,
}

/// Application joined with its student and posting.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    pub student: Option<StudentSummary>,
    pub position: Option<PositionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentApplications {
    pub applications: Vec<ApplicationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
