use rand::Rng;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::geo::haversine_distance;
use super::model::{
    AttendanceRecord, CreateSessionRequest, MarkAttendanceRequest, PinResponse, Session,
    SessionStatus,
};

const DEFAULT_RADIUS_M: f64 = 100.0;

const SESSION_COLUMNS: &str = "id, class_id, date, period_no, start_time, end_time, \
     location, latitude, longitude, radius, status, created_at";

/// The subset of a session the marking path needs.
#[derive(sqlx::FromRow)]
struct SessionGate {
    status: SessionStatus,
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius: f64,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Creates an OPEN session. Overlapping sessions for the same class
    /// are allowed.
    #[instrument(skip(db, dto))]
    pub async fn create_session(
        db: &PgPool,
        dto: CreateSessionRequest,
    ) -> Result<Session, AppError> {
        let sql = format!(
            "INSERT INTO sessions
                 (class_id, date, period_no, start_time, end_time, location,
                  latitude, longitude, radius)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {SESSION_COLUMNS}"
        );
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(&dto.class_id)
            .bind(dto.date)
            .bind(dto.period_no)
            .bind(dto.start_time)
            .bind(dto.end_time)
            .bind(&dto.location)
            .bind(dto.latitude)
            .bind(dto.longitude)
            .bind(dto.radius.unwrap_or(DEFAULT_RADIUS_M))
            .fetch_one(db)
            .await?;

        Ok(session)
    }

    /// Issues a fresh 4-digit PIN for an open session and persists it on
    /// the session row, replacing any previous one.
    #[instrument(skip(db))]
    pub async fn generate_pin(db: &PgPool, session_id: Uuid) -> Result<PinResponse, AppError> {
        let status: Option<(SessionStatus,)> =
            sqlx::query_as("SELECT status FROM sessions WHERE id = $1")
                .bind(session_id)
                .fetch_optional(db)
                .await?;

        let (status,) =
            status.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))?;
        if status != SessionStatus::Open {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Session is not open"
            )));
        }

        let pin = rand::thread_rng().gen_range(1000..=9999).to_string();

        sqlx::query("UPDATE sessions SET pin = $1, pin_issued_at = now() WHERE id = $2")
            .bind(&pin)
            .bind(session_id)
            .execute(db)
            .await?;

        Ok(PinResponse { session_id, pin })
    }

    /// Returns the current PIN for faculty display.
    #[instrument(skip(db))]
    pub async fn get_pin(db: &PgPool, session_id: Uuid) -> Result<PinResponse, AppError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT pin FROM sessions WHERE id = $1")
                .bind(session_id)
                .fetch_optional(db)
                .await?;

        let (pin,) =
            row.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))?;
        let pin = pin.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("PIN not set for this session"))
        })?;

        Ok(PinResponse { session_id, pin })
    }

    /// Marks attendance for the calling student.
    ///
    /// Order of checks: student profile, session existence, OPEN status,
    /// geofence. The write is an upsert keyed by (session_id, student_id);
    /// a repeat mark overwrites status, method, and coordinates, so the
    /// record always reflects the last submission.
    #[instrument(skip(db, dto))]
    pub async fn mark_attendance(
        db: &PgPool,
        user_id: Uuid,
        dto: MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, AppError> {
        let student: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM students WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(db)
                .await?;
        let (student_id,) = student
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student profile not found")))?;

        let session: Option<SessionGate> = sqlx::query_as(
            "SELECT status, latitude, longitude, radius FROM sessions WHERE id = $1",
        )
        .bind(dto.session_id)
        .fetch_optional(db)
        .await?;
        let session =
            session.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))?;

        if session.status != SessionStatus::Open {
            return Err(AppError::bad_request(anyhow::anyhow!("Session is closed")));
        }

        // Geofence applies only when the session has a center point; a
        // session without coordinates accepts marks from anywhere.
        if let (Some(lat), Some(lon)) = (session.latitude, session.longitude) {
            let distance = haversine_distance(dto.latitude, dto.longitude, lat, lon);
            if distance > session.radius {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "You are {}m away from the class location. Maximum allowed: {}m",
                    distance.round(),
                    session.radius
                )));
            }
        }

        let record = sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance_records
                 (session_id, student_id, status, method, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (session_id, student_id) DO UPDATE SET
                 status = EXCLUDED.status,
                 method = EXCLUDED.method,
                 latitude = EXCLUDED.latitude,
                 longitude = EXCLUDED.longitude,
                 marked_at = now()
             RETURNING id, session_id, student_id, status, method, latitude, longitude, marked_at",
        )
        .bind(dto.session_id)
        .bind(student_id)
        .bind(dto.status)
        .bind(dto.method)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .fetch_one(db)
        .await?;

        Ok(record)
    }
}
