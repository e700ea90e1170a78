use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A student profile row, 1:1 with a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reg_no: String,
    pub name: String,
    pub phone: String,
    pub year: String,
    pub branch: String,
    pub section: String,
}

/// Profile shape returned by `GET /students/me`: the student row plus the
/// account email.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub reg_no: String,
    pub name: String,
    pub year: String,
    pub branch: String,
    pub section: String,
    pub email: String,
}

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z .'-]{2,60}$").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[1-4]$").unwrap());
static BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z&. ]{2,30}$").unwrap());
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]$").unwrap());

/// Trims surrounding whitespace before the regex rules run, so padded
/// client input is accepted the same way the mobile app sends it.
fn trim_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Partial profile update for `PUT /students/me`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[serde(default, deserialize_with = "trim_optional")]
    #[validate(regex(
        path = *NAME_RE,
        message = "Name can contain letters and basic punctuation only"
    ))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trim_optional")]
    #[validate(regex(path = *YEAR_RE, message = "Year must be 1, 2, 3, or 4"))]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "trim_optional")]
    #[validate(regex(path = *BRANCH_RE, message = "Branch should be alphabetic (2-30 chars)"))]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "trim_optional")]
    #[validate(regex(
        path = *SECTION_RE,
        message = "Section must be a single uppercase letter (A-Z)"
    ))]
    pub section: Option<String>,
}
