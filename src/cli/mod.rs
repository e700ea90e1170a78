//! CLI commands. Admin accounts are created from the command line only;
//! the registration endpoint is for students and faculty.

use anyhow::{Context, bail};
use sqlx::PgPool;

use crate::utils::password::hash_password;

pub async fn create_admin(pool: &PgPool, email: &str, password: &str) -> anyhow::Result<()> {
    let email = email.trim().to_lowercase();

    let existing: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .context("Failed to check for existing user")?;

    if existing.is_some() {
        bail!("A user with email {} already exists", email);
    }

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    sqlx::query("INSERT INTO users (email, password_hash, role) VALUES ($1, $2, 'ADMIN')")
        .bind(&email)
        .bind(&password_hash)
        .execute(pool)
        .await
        .context("Failed to create admin user")?;

    Ok(())
}
