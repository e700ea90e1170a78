use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "session_status", rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "attendance_status", rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "attendance_method", rename_all = "UPPERCASE")]
pub enum AttendanceMethod {
    Face,
    Biometric,
    Manual,
}

/// A class session. The PIN columns are deliberately absent here so they
/// never leak through session responses; the PIN endpoints query them
/// separately.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub class_id: String,
    pub date: NaiveDate,
    pub period_no: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: f64,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, message = "classId is required"))]
    pub class_id: String,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "periodNo must be between 1 and 10"))]
    pub period_no: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Geofence radius in meters. Defaults to 100.
    pub radius: Option<f64>,
}

fn default_attendance_status() -> AttendanceStatus {
    AttendanceStatus::Present
}

fn default_attendance_method() -> AttendanceMethod {
    AttendanceMethod::Manual
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub session_id: Uuid,
    #[serde(default = "default_attendance_status")]
    pub status: AttendanceStatus,
    #[serde(default = "default_attendance_method")]
    pub method: AttendanceMethod,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

/// One attendance outcome per (session, student). Remarking overwrites
/// in place; there is no history.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    pub student_id: Uuid,
    pub status: AttendanceStatus,
    pub method: AttendanceMethod,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinResponse {
    pub session_id: Uuid,
    pub pin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_request(period_no: i32) -> CreateSessionRequest {
        CreateSessionRequest {
            class_id: "CS101".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            period_no,
            start_time: Utc::now(),
            end_time: Utc::now(),
            location: None,
            latitude: None,
            longitude: None,
            radius: None,
        }
    }

    #[test]
    fn test_period_no_bounds() {
        assert!(session_request(1).validate().is_ok());
        assert!(session_request(10).validate().is_ok());
        assert!(session_request(0).validate().is_err());
        assert!(session_request(11).validate().is_err());
    }

    #[test]
    fn test_mark_request_defaults() {
        let dto: MarkAttendanceRequest = serde_json::from_value(serde_json::json!({
            "sessionId": "b2f6f4a0-7c6e-4b5a-9a3e-2f1d8e4c5b6a",
            "latitude": 12.9716,
            "longitude": 77.5946,
        }))
        .unwrap();

        assert_eq!(dto.status, AttendanceStatus::Present);
        assert_eq!(dto.method, AttendanceMethod::Manual);
    }

    #[test]
    fn test_mark_request_rejects_out_of_range_coordinates() {
        let dto = MarkAttendanceRequest {
            session_id: Uuid::new_v4(),
            status: AttendanceStatus::Present,
            method: AttendanceMethod::Manual,
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(dto.validate().is_err());
    }
}
