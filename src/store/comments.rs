use crate::error::AppError;
use crate::models::{Comment, CommentWithAuthor};
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    text: &str,
) -> Result<Comment, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (text, author_id, post_id)
        VALUES ($1, $2, $3)
        RETURNING
            id,
            text,
            author_id,
            post_id
        "#,
    )
    .bind(text)
    .bind(author_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// A post's comments in insertion order, joined with the author's display
/// name.
pub async fn for_post(pool: &SqlitePool, post_id: i64) -> Result<Vec<CommentWithAuthor>, AppError> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT
            c.id,
            c.text,
            c.author_id,
            c.post_id,
            u.name AS author_name
        FROM
            comments c
        JOIN
            users u ON u.id = c.author_id
        WHERE
            c.post_id = $1
        ORDER BY
            c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
