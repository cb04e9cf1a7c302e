use crate::error::AppError;
use crate::models::User;
use sqlx::SqlitePool;

/// Inserts a new account. Email uniqueness is enforced by the database
/// constraint; a violation maps to `DuplicateEmail` regardless of request
/// ordering. The first account ever created becomes the admin.
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, name, is_admin)
        VALUES ($1, $2, $3, NOT EXISTS (SELECT 1 FROM users))
        RETURNING
            id,
            email,
            password_hash,
            name,
            is_admin
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateEmail))?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT
            id,
            email,
            password_hash,
            name,
            is_admin
        FROM
            users
        WHERE
            email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT
            id,
            email,
            password_hash,
            name,
            is_admin
        FROM
            users
        WHERE
            id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
