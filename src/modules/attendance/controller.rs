use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AttendanceRecord, CreateSessionRequest, MarkAttendanceRequest, PinResponse, Session,
};
use super::service::AttendanceService;

/// Create a class session
#[utoipa::path(
    post,
    path = "/attendance/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = Session),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty/admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSessionRequest>,
) -> Result<Json<Session>, AppError> {
    let session = AttendanceService::create_session(&state.db, dto).await?;
    Ok(Json(session))
}

/// Generate a 4-digit PIN for an open session
#[utoipa::path(
    post,
    path = "/attendance/sessions/{id}/generate-pin",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "PIN generated", body = PinResponse),
        (status = 400, description = "Session is not open", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn generate_pin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PinResponse>, AppError> {
    let response = AttendanceService::generate_pin(&state.db, id).await?;
    Ok(Json(response))
}

/// Read the current PIN for a session (faculty display only)
#[utoipa::path(
    get,
    path = "/attendance/sessions/{id}/pin",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current PIN", body = PinResponse),
        (status = 404, description = "Session or PIN not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_pin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PinResponse>, AppError> {
    let response = AttendanceService::get_pin(&state.db, id).await?;
    Ok(Json(response))
}

/// Mark attendance for an open session
#[utoipa::path(
    post,
    path = "/attendance/mark",
    request_body = MarkAttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Session closed or out of geofence range", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Student profile or session not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceRequest>,
) -> Result<Json<AttendanceRecord>, AppError> {
    let user_id = auth_user.user_id()?;
    let record = AttendanceService::mark_attendance(&state.db, user_id, dto).await?;
    Ok(Json(record))
}
