//! User Repository

use super::{RepoError, RepoResult};
use chrono::Utc;
use shared::models::{User, UserRole};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn map_row(row: &SqliteRow) -> RepoResult<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        role: UserRole::parse(&role)
            .ok_or_else(|| RepoError::Database(format!("Invalid user role: {role}")))?,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, email, password, role FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(map_row).transpose()
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, email, password, role FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(map_row).transpose()
}

/// Insert a user; the unique email index turns races into Duplicate
pub async fn create(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> RepoResult<User> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (first_name, last_name, email, password, role, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(Utc::now().to_rfc3339())
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Duplicate(format!("User with email {email} already exists"))
        }
        _ => RepoError::from(e),
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read user after insert".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    last_name: &str,
    password_hash: Option<&str>,
) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE users SET first_name = ?1, last_name = ?2, \
         password = COALESCE(?3, password) WHERE id = ?4",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read user after update".into()))
}

/// Seed the owner account at startup; no-op if the email is taken
pub async fn ensure_owner(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> RepoResult<()> {
    if find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }
    match create(pool, "Restaurant", "Owner", email, password_hash, UserRole::Owner).await {
        Ok(user) => {
            tracing::info!("Seeded owner account {} (id={})", email, user.id);
            Ok(())
        }
        // Lost a startup race with another instance; the account exists
        Err(RepoError::Duplicate(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
