use crate::error::AppError;
use crate::models::{Post, PostWithAuthor};
use sqlx::SqlitePool;

pub struct NewPost<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub date: &'a str,
    pub body: &'a str,
    pub img_url: &'a str,
    pub author_id: i64,
}

pub struct PostFields<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub body: &'a str,
    pub img_url: &'a str,
}

/// All posts in insertion order, joined with the author's display name.
pub async fn list(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>, AppError> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT
            p.id,
            p.title,
            p.subtitle,
            p.date,
            p.body,
            p.img_url,
            p.author_id,
            u.name AS author_name
        FROM
            blog_posts p
        JOIN
            users u ON u.id = p.author_id
        ORDER BY
            p.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<PostWithAuthor>, AppError> {
    let post = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT
            p.id,
            p.title,
            p.subtitle,
            p.date,
            p.body,
            p.img_url,
            p.author_id,
            u.name AS author_name
        FROM
            blog_posts p
        JOIN
            users u ON u.id = p.author_id
        WHERE
            p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Inserts a new post. Title uniqueness is enforced by the database
/// constraint.
pub async fn create(pool: &SqlitePool, new: NewPost<'_>) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO blog_posts (title, subtitle, date, body, img_url, author_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING
            id,
            title,
            subtitle,
            date,
            body,
            img_url,
            author_id
        "#,
    )
    .bind(new.title)
    .bind(new.subtitle)
    .bind(new.date)
    .bind(new.body)
    .bind(new.img_url)
    .bind(new.author_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        AppError::on_unique_violation(e, AppError::Conflict("A post with this title already exists"))
    })?;

    Ok(post)
}

/// Full field replacement. Author and date are never touched on edit.
pub async fn update(pool: &SqlitePool, id: i64, fields: PostFields<'_>) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE
            blog_posts
        SET
            title = $1,
            subtitle = $2,
            body = $3,
            img_url = $4
        WHERE
            id = $5
        RETURNING
            id,
            title,
            subtitle,
            date,
            body,
            img_url,
            author_id
        "#,
    )
    .bind(fields.title)
    .bind(fields.subtitle)
    .bind(fields.body)
    .bind(fields.img_url)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        AppError::on_unique_violation(e, AppError::Conflict("A post with this title already exists"))
    })?
    .ok_or(AppError::NotFound)?;

    Ok(post)
}

/// Removes the post and its comments in one transaction (cascade-delete).
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM comments
        WHERE post_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query(
        r#"
        DELETE FROM blog_posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    tx.commit().await?;

    Ok(())
}
