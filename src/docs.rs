use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceMethod, AttendanceRecord, AttendanceStatus, CreateSessionRequest,
    MarkAttendanceRequest, PinResponse, Session, SessionStatus,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AuthenticatedUser, Faculty, FacultyProfileDto, LoginRequest, LoginResponse, OkResponse,
    RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest,
    StudentProfileDto, UserRole,
};
use crate::modules::students::model::{Student, StudentProfile, UpdateStudentRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::reset_password,
        crate::modules::students::controller::get_me,
        crate::modules::students::controller::update_me,
        crate::modules::attendance::controller::create_session,
        crate::modules::attendance::controller::generate_pin,
        crate::modules::attendance::controller::get_pin,
        crate::modules::attendance::controller::mark_attendance,
    ),
    components(
        schemas(
            UserRole,
            RegisterRequest,
            RegisterResponse,
            StudentProfileDto,
            FacultyProfileDto,
            LoginRequest,
            LoginResponse,
            AuthenticatedUser,
            RefreshRequest,
            RefreshResponse,
            ResetPasswordRequest,
            OkResponse,
            ErrorResponse,
            Student,
            StudentProfile,
            UpdateStudentRequest,
            Faculty,
            Session,
            SessionStatus,
            CreateSessionRequest,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceMethod,
            MarkAttendanceRequest,
            PinResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and token endpoints"),
        (name = "Students", description = "Student profile endpoints"),
        (name = "Attendance", description = "Class sessions and attendance marking")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Campus attendance backend built with Rust, Axum, and PostgreSQL featuring JWT-based authentication and geofenced attendance marking.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
