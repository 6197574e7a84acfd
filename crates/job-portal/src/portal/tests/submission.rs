use std::sync::Arc;

use super::common::{
    build_workflow, seeded_student, FaultyStudents, OfflineApplications, StudentFault,
    UntouchableStore,
};
use crate::gamification::AwardEvent;
use crate::portal::domain::{ApplicationStatus, PositionKind, StudentId};
use crate::portal::memory::MemoryStore;
use crate::portal::repository::{ApplicationStore, StoreError, StudentStore};
use crate::portal::submission::{
    ApplicationSubmissionWorkflow, AwardStatus, SubmissionError, SubmissionRequest,
    ValidationError,
};

#[test]
fn crossing_threshold_awards_job_hunter() {
    let (workflow, store) = build_workflow();
    let student = seeded_student(&store, "Priya", 45);

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-42"))
        .expect("submission succeeds");

    assert_eq!(outcome.points, 55);
    assert!(outcome.badges.contains("Job Hunter"));
    assert_eq!(
        outcome.award,
        AwardStatus::Awarded {
            newly_awarded: Some("Job Hunter".to_string())
        }
    );
    assert_eq!(outcome.application.status, ApplicationStatus::Applied);
    assert_eq!(outcome.application.job_id, "job-42");

    let stored = store
        .find_student(&student.id)
        .expect("lookup")
        .expect("student present");
    assert_eq!(stored.points, 55);
    assert!(stored.badges.contains("Job Hunter"));
}

#[test]
fn first_application_earns_points_without_badge() {
    let (workflow, store) = build_workflow();
    let student = seeded_student(&store, "Marco", 0);

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-1"))
        .expect("submission succeeds");

    assert_eq!(outcome.points, 10);
    assert!(outcome.badges.is_empty());
    assert_eq!(
        outcome.award,
        AwardStatus::Awarded {
            newly_awarded: None
        }
    );
}

#[test]
fn existing_badge_is_not_duplicated() {
    let (workflow, store) = build_workflow();
    let mut student = seeded_student(&store, "Lena", 60);
    student.badges.insert("Job Hunter".to_string());
    store.save_student(student.clone()).expect("saved");

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-7"))
        .expect("submission succeeds");

    assert_eq!(outcome.points, 70);
    assert_eq!(outcome.badges.len(), 1);
    assert_eq!(
        outcome.award,
        AwardStatus::Awarded {
            newly_awarded: None
        }
    );
}

#[test]
fn unknown_student_still_creates_application() {
    let (workflow, store) = build_workflow();

    let outcome = workflow
        .submit(SubmissionRequest::for_job("stu-ghost", "job-3"))
        .expect("submission succeeds");

    assert_eq!(outcome.points, 0);
    assert!(outcome.badges.is_empty());
    assert_eq!(outcome.award, AwardStatus::StudentNotFound);

    let stored = store
        .applications_for_student(&StudentId::from("stu-ghost"))
        .expect("listing");
    assert_eq!(stored.len(), 1);
}

#[test]
fn consecutive_applications_accumulate_points() {
    let (workflow, store) = build_workflow();
    let student = seeded_student(&store, "Tomas", 0);

    workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-1"))
        .expect("first submission");
    let second = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-1"))
        .expect("second submission");

    assert_eq!(second.points, 20);
    let all = store.applications_for_student(&student.id).expect("listing");
    assert_eq!(all.len(), 2);
    assert_ne!(all[0].id, all[1].id);
}

#[test]
fn missing_identifiers_fail_before_touching_storage() {
    let store = Arc::new(UntouchableStore);
    let workflow = ApplicationSubmissionWorkflow::standard(store.clone(), store);

    let missing_job = SubmissionRequest {
        student_id: Some("stu-1".to_string()),
        position_id: None,
        kind: PositionKind::Job,
    };
    let err = workflow.submit(missing_job).expect_err("validation fails");
    assert!(matches!(
        err,
        SubmissionError::Validation(ValidationError::MissingIdentifiers {
            kind: PositionKind::Job
        })
    ));
    assert_eq!(err.to_string(), "student ID and job ID are required");

    let blank_student = SubmissionRequest::for_internship("   ", "int-1");
    let err = workflow.submit(blank_student).expect_err("validation fails");
    assert_eq!(err.to_string(), "student ID and internship ID are required");
}

#[test]
fn creation_failure_leaves_student_untouched() {
    let students = Arc::new(MemoryStore::default());
    let student = seeded_student(&students, "Noor", 30);
    let workflow =
        ApplicationSubmissionWorkflow::standard(Arc::new(OfflineApplications), students.clone());

    let err = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-9"))
        .expect_err("creation fails");
    assert!(matches!(
        err,
        SubmissionError::Creation(StoreError::Unavailable(_))
    ));

    let stored = students
        .find_student(&student.id)
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.points, 30);
}

#[test]
fn failed_student_lookup_reports_empty_standing() {
    let applications = Arc::new(MemoryStore::default());
    let inner = MemoryStore::default();
    let student = seeded_student(&inner, "Ines", 40);
    let students = Arc::new(FaultyStudents {
        inner,
        fault: StudentFault::Lookup,
    });
    let workflow = ApplicationSubmissionWorkflow::standard(applications.clone(), students);

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-5"))
        .expect("submission still succeeds");

    assert_eq!(outcome.points, 0);
    assert!(outcome.badges.is_empty());
    assert!(matches!(outcome.award, AwardStatus::LookupFailed(_)));
    assert_eq!(
        applications.list_applications().expect("listing").len(),
        1
    );
}

#[test]
fn failed_save_reports_last_persisted_standing() {
    let inner = MemoryStore::default();
    let student = seeded_student(&inner, "Kofi", 45);
    let students = Arc::new(FaultyStudents {
        inner,
        fault: StudentFault::Save,
    });
    let workflow =
        ApplicationSubmissionWorkflow::standard(Arc::new(MemoryStore::default()), students.clone());

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-5"))
        .expect("submission still succeeds");

    assert_eq!(outcome.points, 45);
    assert!(outcome.badges.is_empty());
    assert!(matches!(outcome.award, AwardStatus::SaveFailed(_)));

    let stored = students
        .find_student(&student.id)
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.points, 45);
}

#[test]
fn custom_award_configuration_is_honoured() {
    let store = Arc::new(MemoryStore::default());
    let student = seeded_student(&store, "Ravi", 0);
    let award = AwardEvent::points(25)
        .with_badge("Go Getter")
        .with_threshold(25);
    let workflow = ApplicationSubmissionWorkflow::new(store.clone(), store, award);

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-2"))
        .expect("submission succeeds");

    assert_eq!(outcome.points, 25);
    assert!(outcome.badges.contains("Go Getter"));
    assert_eq!(workflow.award().points, 25);
}

#[test]
fn zero_point_award_is_rejected_but_application_kept() {
    let store = Arc::new(MemoryStore::default());
    let student = seeded_student(&store, "Yara", 40);
    let workflow =
        ApplicationSubmissionWorkflow::new(store.clone(), store.clone(), AwardEvent::points(0));

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-8"))
        .expect("submission still succeeds");

    assert_eq!(outcome.points, 40);
    assert!(outcome.badges.is_empty());
    assert_eq!(
        outcome.award,
        AwardStatus::Rejected("award must add a positive number of points, got 0".to_string())
    );
    assert_eq!(store.list_applications().expect("listing").len(), 1);
    let stored = store
        .find_student(&student.id)
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.points, 40);
}

#[test]
fn overflowing_balance_is_rejected_but_application_kept() {
    let (workflow, store) = build_workflow();
    let student = seeded_student(&store, "Bo", u64::MAX - 5);

    let outcome = workflow
        .submit(SubmissionRequest::for_job(student.id.as_str(), "job-9"))
        .expect("submission still succeeds");

    assert_eq!(outcome.points, u64::MAX - 5);
    assert!(outcome.badges.is_empty());
    assert!(matches!(outcome.award, AwardStatus::Rejected(_)));
    assert_eq!(store.list_applications().expect("listing").len(), 1);
    let stored = store
        .find_student(&student.id)
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.points, u64::MAX - 5);
}
