use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::BadgeSet;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

record_id!(
    /// Identifier wrapper for registered students.
    StudentId
);
record_id!(CompanyId);
record_id!(JobId);
record_id!(InternshipId);
record_id!(
    /// Identifier wrapper for submitted applications.
    ApplicationId
);

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique identifier such as `stu-000042`.
pub(crate) fn next_id(prefix: &str) -> String {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudentRole {
    #[default]
    Student,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompanyRole {
    #[default]
    Company,
    Admin,
}

/// Registered student together with the gamification standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: StudentRole,
    pub points: u64,
    pub badges: BadgeSet,
}

impl StudentRecord {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: StudentId(next_id("stu")),
            name,
            email,
            password,
            role: StudentRole::default(),
            points: 0,
            badges: BadgeSet::new(),
        }
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            points: self.points,
            badges: self.badges.clone(),
        }
    }
}

/// Student fields exposed alongside applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub points: u64,
    pub badges: BadgeSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: CompanyRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl CompanyRecord {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: CompanyId(next_id("cmp")),
            name,
            email,
            password,
            role: CompanyRole::default(),
            industry: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-Time")]
    FullTime,
    Internship,
}

/// Whether a posting still accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostingStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub company_id: CompanyId,
    pub category: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary: String,
    pub application_deadline: Option<NaiveDate>,
    pub status: PostingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipRecord {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub salary: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub status: PostingStatus,
}

/// Kind of posting an application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    Job,
    Internship,
}

impl PositionKind {
    pub const fn noun(self) -> &'static str {
        match self {
            PositionKind::Job => "job",
            PositionKind::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// A student's application to a job or internship posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub job_id: String,
    pub position_kind: PositionKind,
    pub status: ApplicationStatus,
    pub submission_date: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(student_id: StudentId, position: PositionRef, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId(next_id("app")),
            student_id,
            job_id: position.id,
            position_kind: position.kind,
            status: ApplicationStatus::default(),
            submission_date: submitted_at,
        }
    }

    pub fn position(&self) -> PositionRef {
        PositionRef {
            kind: self.position_kind,
            id: self.job_id.clone(),
        }
    }
}

/// Reference to the job or internship an application targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionRef {
    pub kind: PositionKind,
    pub id: String,
}

impl PositionRef {
    pub fn job(id: impl Into<String>) -> Self {
        Self {
            kind: PositionKind::Job,
            id: id.into(),
        }
    }
}

/// Posting fields exposed alongside applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub id: String,
    pub kind: PositionKind,
    pub title: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub position_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub status: PostingStatus,
}

impl From<&JobRecord> for PositionSummary {
    fn from(job: &JobRecord) -> Self {
        Self {
            id: job.id.0.clone(),
            kind: PositionKind::Job,
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            description: Some(job.description.clone()),
            category: Some(job.category.clone()),
            position_type: match job.job_type {
                JobType::FullTime => "Full-Time".to_string(),
                JobType::Internship => "Internship".to_string(),
            },
            salary: Some(job.salary.clone()),
            status: job.status,
        }
    }
}

impl From<&InternshipRecord> for PositionSummary {
    fn from(internship: &InternshipRecord) -> Self {
        Self {
            id: internship.id.0.clone(),
            kind: PositionKind::Internship,
            title: internship.title.clone(),
            company_name: internship.company.clone(),
            description: Some(internship.description.clone()),
            category: internship.category.clone(),
            position_type: internship.kind.clone(),
            salary: internship.salary.clone(),
            status: internship.status,
        }
    }
}
