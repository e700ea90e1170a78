use axum::body::Body;
use axum::http::Request;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use rollcall::config::cors::CorsConfig;
use rollcall::config::jwt::JwtConfig;
use rollcall::modules::attendance::model::SessionStatus;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall::utils::password::hash_password;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub fn generate_unique_email() -> String {
    format!("user-{}@campus.edu", Uuid::new_v4())
}

pub fn generate_unique_reg_no() -> String {
    format!("21CS{}", &Uuid::new_v4().simple().to_string()[..8])
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig {
            access_secret: "test_access_secret".to_string(),
            refresh_secret: "test_refresh_secret".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestStudent {
    pub user_id: Uuid,
    pub student_id: Uuid,
    pub email: String,
    pub reg_no: String,
}

/// Creates a STUDENT user with a linked student profile.
pub async fn create_test_student(pool: &PgPool, password: &str) -> TestStudent {
    let email = generate_unique_email();
    let reg_no = generate_unique_reg_no();
    let hashed = hash_password(password).unwrap();

    let (user_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, 'STUDENT') RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    let (student_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO students (user_id, reg_no, name, phone, year, branch, section)
         VALUES ($1, $2, 'Test Student', '9876543210', '2', 'CSE', 'A')
         RETURNING id",
    )
    .bind(user_id)
    .bind(&reg_no)
    .fetch_one(pool)
    .await
    .unwrap();

    TestStudent {
        user_id,
        student_id,
        email,
        reg_no,
    }
}

/// Creates a STUDENT user with no student profile row.
pub async fn create_test_user_without_profile(pool: &PgPool, password: &str) -> String {
    let email = generate_unique_email();
    let hashed = hash_password(password).unwrap();

    sqlx::query("INSERT INTO users (email, password_hash, role) VALUES ($1, $2, 'STUDENT')")
        .bind(&email)
        .bind(&hashed)
        .execute(pool)
        .await
        .unwrap();

    email
}

/// Creates a session directly in the database. Pass `None` for the center
/// to leave the session ungeofenced.
pub async fn create_test_session(
    pool: &PgPool,
    status: SessionStatus,
    center: Option<(f64, f64)>,
    radius: f64,
) -> Uuid {
    let (latitude, longitude) = match center {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };
    let now = Utc::now();

    let (session_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO sessions
             (class_id, date, period_no, start_time, end_time, latitude, longitude, radius, status)
         VALUES ('CS101', $1, 1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
    .bind(now)
    .bind(now + Duration::hours(1))
    .bind(latitude)
    .bind(longitude)
    .bind(radius)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap();

    session_id
}

/// Logs in over HTTP and returns the access token.
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["accessToken"].as_str().unwrap().to_string()
}

/// POSTs a JSON body with a bearer token and returns the response.
pub async fn post_json_authed(
    app: axum::Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
