use crate::models::CommentRecord;
use sqlx::PgPool;

/// Create a new comment on a post.
///
/// A missing post surfaces as a foreign-key violation from the store.
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
    content: &str,
) -> Result<CommentRecord, sqlx::Error> {
    sqlx::query_as::<_, CommentRecord>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, content, created_at, updated_at, post_id, user_id
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Get a single comment by ID
pub async fn get_comment_by_id(
    pool: &PgPool,
    comment_id: i64,
) -> Result<Option<CommentRecord>, sqlx::Error> {
    sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT id, content, created_at, updated_at, post_id, user_id
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Update comment content
pub async fn update_comment(
    pool: &PgPool,
    comment_id: i64,
    content: &str,
) -> Result<Option<CommentRecord>, sqlx::Error> {
    sqlx::query_as::<_, CommentRecord>(
        r#"
        UPDATE comments
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, content, created_at, updated_at, post_id, user_id
        "#,
    )
    .bind(content)
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
