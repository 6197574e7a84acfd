use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::portal::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::portal::memory::MemoryStore;
use crate::portal::payload::{ApplicationRequest, RegisterRequest};
use crate::portal::repository::{ApplicationStore, StoreError};
use crate::portal::router::{portal_router, register_handler, submit_application_handler};
use crate::portal::service::PortalError;
use crate::portal::submission::SubmissionError;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn submit_handler_returns_created_with_standing() {
    let (service, store) = build_service();
    let student = seeded_student(&store, "Dara", 45);

    let response = submit_application_handler::<MemoryStore>(
        State(service),
        Json(ApplicationRequest {
            student_id: Some(student.id.0.clone()),
            job_id: Some("job-77".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["points"], json!(55));
    assert_eq!(body["badges"], json!(["Job Hunter"]));
    assert_eq!(body["application"]["status"], json!("Applied"));
    assert_eq!(body["application"]["jobId"], json!("job-77"));
    assert!(body.get("award").is_none());
}

#[tokio::test]
async fn submit_handler_rejects_missing_ids() {
    let (service, store) = build_service();

    let response = submit_application_handler::<MemoryStore>(
        State(service),
        Json(ApplicationRequest {
            student_id: Some("stu-1".to_string()),
            job_id: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], json!("student ID and job ID are required"));
    assert!(store.list_applications().unwrap().is_empty());
}

#[tokio::test]
async fn register_handler_returns_created() {
    let (service, _) = build_service();

    let response = register_handler::<MemoryStore>(
        State(service),
        Json(RegisterRequest {
            name: Some("Acme".to_string()),
            email: Some("hr@acme.test".to_string()),
            password: Some("pw".to_string()),
            account_type: Some("company".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["message"], json!("Company registered successfully"));
    assert_eq!(body["user"]["role"], json!("Company"));
}

#[test]
fn error_statuses_follow_failure_kind() {
    let cases = [
        (
            PortalError::Validation("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (PortalError::InvalidCredentials, StatusCode::BAD_REQUEST),
        (
            PortalError::NotFound { entity: "job" },
            StatusCode::NOT_FOUND,
        ),
        (PortalError::Unauthenticated, StatusCode::UNAUTHORIZED),
        (
            PortalError::Forbidden("nope".to_string()),
            StatusCode::FORBIDDEN,
        ),
        (
            PortalError::Store(StoreError::Conflict("dup".to_string())),
            StatusCode::CONFLICT,
        ),
        (
            PortalError::Submission(SubmissionError::Creation(StoreError::Unavailable(
                "down".to_string(),
            ))),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.status(), status, "{err}");
    }
}

#[tokio::test]
async fn apply_route_accepts_payloads() {
    let (service, store) = build_service();
    let student = seeded_student(&store, "Remy", 0);
    let router = portal_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/applications",
            json!({ "studentId": student.id.0, "jobId": "job-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["points"], json!(10));
    assert_eq!(body["badges"], json!([]));
}

#[tokio::test]
async fn register_then_login_over_http() {
    let (service, _) = build_service();
    let router = portal_router(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Sam",
                "email": "sam@example.edu",
                "password": "pw",
                "type": "student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({ "email": "sam@example.edu", "password": "wrong", "type": "student" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({ "email": "sam@example.edu", "password": "pw", "type": "student" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["message"], json!("Login Successful"));
}

#[tokio::test]
async fn my_jobs_requires_identity_headers() {
    let (service, _) = build_service();
    let router = portal_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::get("/jobs/my-jobs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(
            Request::get("/jobs/my-jobs")
                .header(USER_ID_HEADER, "stu-1")
                .header(USER_ROLE_HEADER, "student")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let (service, _) = build_service();
    let router = portal_router(service);

    let response = router
        .oneshot(
            Request::get("/students/stu-missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], json!("student not found"));
}

#[tokio::test]
async fn student_applications_route_lists_by_query() {
    let (service, store) = build_service();
    let student = seeded_student(&store, "Ilse", 0);
    service
        .submit_application(ApplicationRequest {
            student_id: Some(student.id.0.clone()),
            job_id: Some("job-3".to_string()),
        })
        .unwrap();
    let router = portal_router(service);

    let uri = format!("/applications/student?studentId={}", student.id);
    let response = router
        .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let applications = body["applications"].as_array().expect("array");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["student"]["points"], json!(10));
}
