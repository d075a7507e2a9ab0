use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use secrecy::SecretBox;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use tutorhub_backend::app::create_router;
use tutorhub_backend::app_state::AppState;
use tutorhub_backend::auth::{AuthProvider, MemoryAuth};
use tutorhub_backend::config::{
    AppConfig, BackendConfig, BackendKind, Config, Environment, ServerConfig,
};
use tutorhub_backend::store::MemoryStore;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        },
        backend: BackendConfig {
            kind: BackendKind::Memory,
            base_url: None,
            api_key: None,
        },
        app: AppConfig {
            name: "TutorHub Backend".to_string(),
            environment: Environment::Development,
            static_dir: "static".to_string(),
        },
    }
}

fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryAuth::new()),
        test_config(),
    )
}

fn test_app() -> Router {
    create_router(test_state())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn signup_tutor(app: &Router, name: &str, subjects: &[&str], city: &str) -> (String, String) {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let payload = json!({
        "email": email,
        "password": "hunter2x",
        "name": name,
        "role": "tutor",
        "subjects": subjects,
        "city": city,
        "hourlyRate": 30.0,
    });
    let (status, body) = send(app, post_json("/auth/signup", None, &payload)).await;
    assert_eq!(status, StatusCode::CREATED, "tutor signup failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["profile"]["id"].as_str().unwrap().to_string(),
    )
}

async fn signup_student(app: &Router, name: &str) -> (String, String) {
    let email = format!("{}@example.com", name.to_lowercase());
    let payload = json!({
        "email": email,
        "password": "hunter2x",
        "name": name,
        "role": "student",
    });
    let (status, body) = send(app, post_json("/auth/signup", None, &payload)).await;
    assert_eq!(status, StatusCode::CREATED, "student signup failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["profile"]["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn health_reports_a_reachable_store() {
    let app = test_app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["store"], "healthy");
}

#[tokio::test]
async fn signup_login_book_and_read_the_dashboard() {
    let app = test_app();
    let (_, tutor_id) = signup_tutor(&app, "Ann Lee", &["Math", "Physics"], "Oslo").await;
    let (student_token, student_id) = signup_student(&app, "Jo").await;

    let booking = json!({
        "tutorId": tutor_id,
        "subject": "Math",
        "date": "2026-09-01",
        "startTime": "10:00",
        "durationHours": 2,
    });
    let (status, body) = send(&app, post_json("/bookings", Some(&student_token), &booking)).await;
    assert_eq!(status, StatusCode::CREATED, "booking failed: {body}");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["endTime"], "12:00");

    let contact = json!({ "tutorId": tutor_id, "message": "Hi, can we start next week?" });
    let (status, _) = send(&app, post_json("/contacts", Some(&student_token), &contact)).await;
    assert_eq!(status, StatusCode::CREATED);

    // The tutor logs in on their own and sees the student on both lists,
    // deduplicated down to one counterpart id.
    let login = json!({ "email": "ann.lee@example.com", "password": "hunter2x" });
    let (status, body) = send(&app, post_json("/auth/login", None, &login)).await;
    assert_eq!(status, StatusCode::OK);
    let tutor_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get("/dashboard", Some(&tutor_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    let dashboard = &body["dashboard"];
    assert_eq!(dashboard["profile"]["role"], "tutor");
    assert_eq!(dashboard["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(
        dashboard["counterpartIds"],
        json!([student_id]),
        "one student across a booking and a contact is one counterpart"
    );
}

#[tokio::test]
async fn tutor_listing_filters_and_facets() {
    let app = test_app();
    signup_tutor(&app, "Ann Lee", &["Math", "Physics"], "Oslo").await;
    signup_tutor(&app, "Bo Kim", &["Chemistry"], "Oslo").await;

    let (status, body) = send(&app, get("/tutors?search=ann", None)).await;
    assert_eq!(status, StatusCode::OK);
    let tutors = body["tutors"].as_array().unwrap();
    assert_eq!(tutors.len(), 1);
    assert_eq!(tutors[0]["name"], "Ann Lee");

    let (_, body) = send(&app, get("/tutors?subject=Chemistry", None)).await;
    let tutors = body["tutors"].as_array().unwrap();
    assert_eq!(tutors.len(), 1);
    assert_eq!(tutors[0]["name"], "Bo Kim");

    let (_, body) = send(&app, get("/tutors?city=Oslo", None)).await;
    assert_eq!(body["tutors"].as_array().unwrap().len(), 2);

    // Facets come from the full tutor set even when the listing is narrowed.
    let (_, narrowed) = send(&app, get("/tutors?search=ann", None)).await;
    assert_eq!(narrowed["subjects"], json!(["Math", "Physics", "Chemistry"]));
    assert_eq!(narrowed["cities"], json!(["Oslo"]));
}

#[tokio::test]
async fn duplicate_signup_email_maps_to_conflict() {
    let app = test_app();
    signup_student(&app, "Jo").await;

    let payload = json!({
        "email": "jo@example.com",
        "password": "hunter2x",
        "name": "Jo Again",
        "role": "student",
    });
    let (status, body) = send(&app, post_json("/auth/signup", None, &payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "This email is already in use.");
}

#[tokio::test]
async fn weak_password_maps_to_bad_request() {
    let app = test_app();
    let payload = json!({
        "email": "jo@example.com",
        "password": "jo",
        "name": "Jo",
        "role": "student",
    });
    let (status, body) = send(&app, post_json("/auth/signup", None, &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Password should be at least 6 characters."
    );
}

#[tokio::test]
async fn retried_booking_with_an_idempotency_key_writes_once() {
    let app = test_app();
    let (tutor_token, tutor_id) = signup_tutor(&app, "Ann Lee", &["Math"], "Oslo").await;
    let (student_token, _) = signup_student(&app, "Jo").await;

    let key = Uuid::new_v4().to_string();
    let booking = json!({
        "tutorId": tutor_id,
        "subject": "Math",
        "date": "2026-09-01",
        "startTime": "10:00",
        "durationHours": 1,
    });
    for _ in 0..2 {
        let request = Request::builder()
            .method("POST")
            .uri("/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {student_token}"))
            .header("Idempotency-Key", &key)
            .body(Body::from(booking.to_string()))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, get("/dashboard", Some(&tutor_token))).await;
    assert_eq!(
        body["dashboard"]["bookings"].as_array().unwrap().len(),
        1,
        "the retry must overwrite the same document"
    );
}

#[tokio::test]
async fn logout_ends_the_bearer_session() {
    let app = test_app();
    let (token, _) = signup_student(&app, "Jo").await;

    let (status, _) = send(&app, get("/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, post_json("/auth/logout", Some(&token), &json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get("/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_reject_missing_bearer_tokens() {
    let app = test_app();

    let (status, _) = send(&app, get("/dashboard", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let booking = json!({
        "tutorId": Uuid::new_v4(),
        "subject": "Math",
        "date": "2026-09-01",
        "startTime": "10:00",
        "durationHours": 1,
    });
    let (status, _) = send(&app, post_json("/bookings", None, &booking)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn a_principal_without_a_profile_document_is_pending() {
    // Signup writes the profile right after account creation, so over HTTP
    // the gap only shows while that write is still propagating. Open the
    // account directly against the provider to pin the in-between state.
    let state = test_state();
    let session = state
        .auth
        .create_account(
            "ann@example.com",
            &SecretBox::new(Box::new("hunter2x".to_string())),
        )
        .await
        .unwrap();
    let app = create_router(state);

    let (status, body) = send(&app, get("/dashboard", Some(&session.token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
}
