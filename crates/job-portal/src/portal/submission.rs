use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicationRecord, PositionKind, PositionRef, StudentId};
use super::repository::{ApplicationStore, StoreError, StudentStore};
use crate::config::GamificationConfig;
use crate::gamification::{AwardEvent, BadgeSet, GamificationEngine};

/// Identifiers a student supplies when applying to a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub student_id: Option<String>,
    pub position_id: Option<String>,
    pub kind: PositionKind,
}

impl SubmissionRequest {
    pub fn for_job(student_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            student_id: Some(student_id.into()),
            position_id: Some(job_id.into()),
            kind: PositionKind::Job,
        }
    }

    pub fn for_internship(
        student_id: impl Into<String>,
        internship_id: impl Into<String>,
    ) -> Self {
        Self {
            student_id: Some(student_id.into()),
            position_id: Some(internship_id.into()),
            kind: PositionKind::Internship,
        }
    }

    /// Blank identifiers count as missing.
    pub fn validate(&self) -> Result<(StudentId, PositionRef), ValidationError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        match (present(&self.student_id), present(&self.position_id)) {
            (Some(student), Some(position)) => Ok((
                StudentId(student),
                PositionRef {
                    kind: self.kind,
                    id: position,
                },
            )),
            _ => Err(ValidationError::MissingIdentifiers { kind: self.kind }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("student ID and {} ID are required", .kind.noun())]
    MissingIdentifiers { kind: PositionKind },
}

/// How the gamification step of a submission went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardStatus {
    Awarded { newly_awarded: Option<String> },
    StudentNotFound,
    LookupFailed(StoreError),
    Rejected(String),
    SaveFailed(StoreError),
}

/// Created application plus the student's resulting standing.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub application: ApplicationRecord,
    pub points: u64,
    pub badges: BadgeSet,
    #[serde(skip)]
    pub award: AwardStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to create application: {0}")]
    Creation(#[source] StoreError),
}

/// Creates the application record, then awards the applicant.
///
/// The two steps are independent store operations. Once the application is stored the
/// submission succeeds even if the student cannot be loaded or saved; the response then falls
/// back to whatever standing is known to be persisted. Concurrent submissions for the same
/// student race on the points read-modify-write.
pub struct ApplicationSubmissionWorkflow<A, S> {
    applications: Arc<A>,
    students: Arc<S>,
    engine: GamificationEngine,
    award: AwardEvent,
}

impl<A, S> ApplicationSubmissionWorkflow<A, S>
where
    A: ApplicationStore + 'static,
    S: StudentStore + 'static,
{
    pub fn new(applications: Arc<A>, students: Arc<S>, award: AwardEvent) -> Self {
        Self {
            applications,
            students,
            engine: GamificationEngine::new(),
            award,
        }
    }

    /// Ten points per application and "Job Hunter" at fifty.
    pub fn standard(applications: Arc<A>, students: Arc<S>) -> Self {
        Self::new(
            applications,
            students,
            GamificationConfig::default().application_award(),
        )
    }

    pub fn award(&self) -> &AwardEvent {
        &self.award
    }

    pub fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let (student_id, position) = request.validate()?;

        let record = ApplicationRecord::new(student_id.clone(), position, Utc::now());
        let application = self
            .applications
            .insert_application(record)
            .map_err(SubmissionError::Creation)?;

        let (points, badges, award) = self.award_student(&student_id);

        info!(
            application_id = %application.id,
            student_id = %student_id,
            position_id = %application.job_id,
            points,
            "application submitted"
        );

        Ok(SubmissionOutcome {
            application,
            points,
            badges,
            award,
        })
    }

    fn award_student(&self, student_id: &StudentId) -> (u64, BadgeSet, AwardStatus) {
        let mut student = match self.students.find_student(student_id) {
            Ok(Some(student)) => student,
            Ok(None) => {
                debug!(student_id = %student_id, "applicant not registered, skipping award");
                return (0, BadgeSet::new(), AwardStatus::StudentNotFound);
            }
            Err(err) => {
                warn!(student_id = %student_id, error = %err, "student lookup failed, skipping award");
                return (0, BadgeSet::new(), AwardStatus::LookupFailed(err));
            }
        };

        let standing = match self
            .engine
            .award(student.points, &student.badges, &self.award)
        {
            Ok(standing) => standing,
            Err(err) => {
                warn!(student_id = %student_id, error = %err, "award rejected");
                return (
                    student.points,
                    student.badges,
                    AwardStatus::Rejected(err.to_string()),
                );
            }
        };

        let previous = (student.points, student.badges.clone());
        student.points = standing.points;
        student.badges = standing.badges;

        match self.students.save_student(student.clone()) {
            Ok(()) => {
                if let Some(badge) = standing.newly_awarded.as_deref() {
                    info!(student_id = %student_id, badge, "badge awarded");
                }
                (
                    student.points,
                    student.badges,
                    AwardStatus::Awarded {
                        newly_awarded: standing.newly_awarded,
                    },
                )
            }
            Err(err) => {
                warn!(student_id = %student_id, error = %err, "failed to persist award");
                (previous.0, previous.1, AwardStatus::SaveFailed(err))
            }
        }
    }
}
