use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Student, StudentProfile, UpdateStudentRequest};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<StudentProfile, AppError> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            "SELECT s.id, s.reg_no, s.name, s.year, s.branch, s.section, u.email
             FROM students s
             JOIN users u ON u.id = s.user_id
             WHERE s.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student profile not found")))?;

        Ok(profile)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateStudentRequest,
    ) -> Result<Student, AppError> {
        let updated = sqlx::query_as::<_, Student>(
            "UPDATE students
             SET name = COALESCE($1, name),
                 year = COALESCE($2, year),
                 branch = COALESCE($3, branch),
                 section = COALESCE($4, section)
             WHERE user_id = $5
             RETURNING id, user_id, reg_no, name, phone, year, branch, section",
        )
        .bind(dto.name)
        .bind(dto.year)
        .bind(dto.branch)
        .bind(dto.section)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student profile not found")))?;

        Ok(updated)
    }
}
