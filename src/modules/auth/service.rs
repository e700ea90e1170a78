use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::students::model::Student;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_refresh_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    AuthenticatedUser, Claims, Faculty, LoginRequest, LoginResponse, RefreshResponse,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, UserRole,
};

#[derive(sqlx::FromRow)]
struct UserWithPassword {
    id: Uuid,
    email: String,
    password_hash: String,
    role: UserRole,
}

#[derive(sqlx::FromRow)]
struct StudentCredentials {
    user_id: Uuid,
    phone: String,
}

pub struct AuthService;

impl AuthService {
    /// Creates the user and, when a matching profile is supplied, the
    /// student or faculty row inside one transaction. A profile insert
    /// failure rolls the user back.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await?;

        let (user_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(dto.role)
        .fetch_one(&mut *tx)
        .await?;

        if dto.role == UserRole::Student {
            if let Some(student) = &dto.student {
                sqlx::query(
                    "INSERT INTO students (user_id, reg_no, name, phone, year, branch, section)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(user_id)
                .bind(&student.reg_no)
                .bind(&student.name)
                .bind(&student.phone)
                .bind(&student.year)
                .bind(&student.branch)
                .bind(&student.section)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(db_err) = &e {
                        if db_err.is_unique_violation() {
                            return AppError::conflict(anyhow::anyhow!(
                                "Registration number already exists"
                            ));
                        }
                    }
                    AppError::database(anyhow::Error::from(e))
                })?;
            }
        }

        if dto.role == UserRole::Faculty {
            if let Some(faculty) = &dto.faculty {
                sqlx::query("INSERT INTO faculty (user_id, name, department) VALUES ($1, $2, $3)")
                    .bind(user_id)
                    .bind(&faculty.name)
                    .bind(&faculty.department)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(RegisterResponse {
            id: user_id,
            email,
            role: dto.role,
        })
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = match (&dto.email, &dto.password, &dto.reg_no, &dto.phone) {
            (Some(email), Some(password), _, _) => {
                Self::authenticate_by_email(db, email, password).await?
            }
            (_, _, Some(reg_no), Some(phone)) => {
                Self::authenticate_by_reg_no(db, reg_no, phone).await?
            }
            // Unreachable behind LoginRequest's schema validation.
            _ => {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Provide email+password or regNo+phone"
                )));
            }
        };

        let access_token = create_access_token(user.id, user.role, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, user.role, jwt_config)?;

        let student = Self::student_for_user(db, user.id).await?;
        let faculty = Self::faculty_for_user(db, user.id).await?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: AuthenticatedUser {
                id: user.id,
                email: user.email,
                role: user.role,
                student,
                faculty,
            },
        })
    }

    /// Validates the refresh token and mints a new access token only.
    /// Refresh tokens are never rotated or extended here.
    #[instrument(skip(db, refresh_token, jwt_config))]
    pub async fn refresh(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let (user_id, role) = Self::identity_from_claims(&claims)?;

        // The user must still exist; tokens outliving their account are
        // rejected here rather than at every protected route.
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;
        if exists.is_none() {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid refresh token"
            )));
        }

        let access_token = create_access_token(user_id, role, jwt_config)?;
        Ok(RefreshResponse { access_token })
    }

    #[instrument(skip(db, dto))]
    pub async fn reset_password(db: &PgPool, dto: ResetPasswordRequest) -> Result<(), AppError> {
        let student: Option<StudentCredentials> =
            sqlx::query_as("SELECT user_id, phone FROM students WHERE reg_no = $1")
                .bind(&dto.reg_no)
                .fetch_optional(db)
                .await?;

        let student = match student {
            Some(s) if s.phone == dto.phone => s,
            _ => {
                return Err(AppError::unauthorized(anyhow::anyhow!(
                    "Verification failed"
                )));
            }
        };

        let password_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
            .bind(&password_hash)
            .bind(student.user_id)
            .execute(db)
            .await?;

        Ok(())
    }

    pub fn identity_from_claims(claims: &Claims) -> Result<(Uuid, UserRole), AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))?;
        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid role in token")))?;
        Ok((user_id, role))
    }

    async fn authenticate_by_email(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserWithPassword, AppError> {
        let user: UserWithPassword = sqlx::query_as(
            "SELECT id, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid credentials"
            )));
        }

        Ok(user)
    }

    async fn authenticate_by_reg_no(
        db: &PgPool,
        reg_no: &str,
        phone: &str,
    ) -> Result<UserWithPassword, AppError> {
        let user: Option<UserWithPassword> = sqlx::query_as(
            "SELECT u.id, u.email, u.password_hash, u.role
             FROM users u
             JOIN students s ON s.user_id = u.id
             WHERE s.reg_no = $1 AND s.phone = $2",
        )
        .bind(reg_no)
        .bind(phone)
        .fetch_optional(db)
        .await?;

        user.ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))
    }

    async fn student_for_user(db: &PgPool, user_id: Uuid) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, user_id, reg_no, name, phone, year, branch, section
             FROM students WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(student)
    }

    async fn faculty_for_user(db: &PgPool, user_id: Uuid) -> Result<Option<Faculty>, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(
            "SELECT id, user_id, name, department FROM faculty WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(faculty)
    }
}
