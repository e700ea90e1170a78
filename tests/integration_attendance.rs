mod common;

use axum::http::StatusCode;
use common::{
    create_test_session, create_test_student, create_test_user_without_profile, get_auth_token,
    post_json_authed, response_json, setup_test_app,
};
use rollcall::modules::attendance::model::SessionStatus;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// Geofence center used across these tests, with one point ~50m north of
// it and one ~150m north of it.
const CENTER_LAT: f64 = 12.9716;
const CENTER_LON: f64 = 77.5946;
const NEARBY_LAT: f64 = CENTER_LAT + 0.00045;
const FARAWAY_LAT: f64 = CENTER_LAT + 0.00135;

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_attendance_within_geofence_succeeds(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let session_id = create_test_session(
        &pool,
        SessionStatus::Open,
        Some((CENTER_LAT, CENTER_LON)),
        100.0,
    )
    .await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "latitude": NEARBY_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["sessionId"], json!(session_id));
    assert_eq!(body["studentId"], json!(student.student_id));
    assert_eq!(body["status"], "PRESENT");
    assert_eq!(body["method"], "MANUAL");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_attendance_outside_geofence_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let session_id = create_test_session(
        &pool,
        SessionStatus::Open,
        Some((CENTER_LAT, CENTER_LON)),
        100.0,
    )
    .await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "latitude": FARAWAY_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("away from the class location"));
    assert!(message.contains("Maximum allowed: 100m"));

    let (count,): (i64,) =
        sqlx::query_as("SELECT count(*) FROM attendance_records WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_attendance_on_closed_session_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let session_id = create_test_session(&pool, SessionStatus::Closed, None, 100.0).await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "latitude": CENTER_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Session is closed");

    let (count,): (i64,) =
        sqlx::query_as("SELECT count(*) FROM attendance_records WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remark_overwrites_previous_record(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let session_id = create_test_session(&pool, SessionStatus::Open, None, 100.0).await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    let first = post_json_authed(
        app.clone(),
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "status": "PRESENT",
            "method": "MANUAL",
            "latitude": CENTER_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = response_json(first).await;

    let second = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "status": "LATE",
            "method": "FACE",
            "latitude": NEARBY_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = response_json(second).await;

    // Same row, updated in place with the later submission.
    assert_eq!(second_body["id"], first_body["id"]);
    assert_eq!(second_body["status"], "LATE");
    assert_eq!(second_body["method"], "FACE");

    let (count, status): (i64, String) = sqlx::query_as(
        "SELECT count(*), min(status::text)
         FROM attendance_records
         WHERE session_id = $1 AND student_id = $2",
    )
    .bind(session_id)
    .bind(student.student_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert_eq!(status, "LATE");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_session_without_coordinates_accepts_any_location(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let session_id = create_test_session(&pool, SessionStatus::Open, None, 100.0).await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    // Nowhere near campus; accepted because the session is ungeofenced.
    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "latitude": 48.8584,
            "longitude": 2.2945
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_attendance_without_profile_returns_404(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = create_test_user_without_profile(&pool, "password123").await;
    let session_id = create_test_session(&pool, SessionStatus::Open, None, 100.0).await;
    let token = get_auth_token(app.clone(), &email, "password123").await;

    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": session_id,
            "latitude": CENTER_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Student profile not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_attendance_unknown_session_returns_404(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let student = create_test_student(&pool, "password123").await;
    let token = get_auth_token(app.clone(), &student.email, "password123").await;

    let response = post_json_authed(
        app,
        "/attendance/mark",
        &token,
        json!({
            "sessionId": Uuid::new_v4(),
            "latitude": CENTER_LAT,
            "longitude": CENTER_LON
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Session not found");
}
