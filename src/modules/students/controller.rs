use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Student, StudentProfile, UpdateStudentRequest};
use super::service::StudentService;

/// Get the authenticated student's profile
#[utoipa::path(
    get,
    path = "/students/me",
    responses(
        (status = 200, description = "Student profile", body = StudentProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<StudentProfile>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = StudentService::get_profile(&state.db, user_id).await?;
    Ok(Json(profile))
}

/// Update the authenticated student's profile
#[utoipa::path(
    put,
    path = "/students/me",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated student profile", body = Student),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let user_id = auth_user.user_id()?;
    let updated = StudentService::update_profile(&state.db, user_id, dto).await?;
    Ok(Json(updated))
}
