use crate::models::{Comment, CommentWithAuthorRow, Post, PostRecord, PostWithAuthorRow};
use sqlx::PgPool;
use std::collections::HashMap;

/// All posts, newest first, each with its author and comments (oldest first).
pub async fn list_posts_with_comments(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PostWithAuthorRow>(
        r#"
        SELECT p.id, p.title, p.content, p.created_at, p.updated_at, p.user_id,
               u.name AS author_name
        FROM forum_posts p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let comment_rows = sqlx::query_as::<_, CommentWithAuthorRow>(
        r#"
        SELECT c.id, c.content, c.created_at, c.updated_at, c.post_id, c.user_id,
               u.name AS author_name
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = ANY($1)
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(&post_ids)
    .fetch_all(pool)
    .await?;

    Ok(attach_comments(rows, comment_rows))
}

/// Nest comment rows under their posts, keeping both input orders.
/// Posts without comments get an empty list.
pub(crate) fn attach_comments(
    rows: Vec<PostWithAuthorRow>,
    comment_rows: Vec<CommentWithAuthorRow>,
) -> Vec<Post> {
    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for row in comment_rows {
        by_post.entry(row.post_id).or_default().push(Comment::from(row));
    }

    rows.into_iter()
        .map(|row| {
            let mut post = Post::from(row);
            post.comments = by_post.remove(&post.id).unwrap_or_default();
            post
        })
        .collect()
}

/// Get a single post by ID
pub async fn get_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, title, content, created_at, updated_at, user_id
        FROM forum_posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Create a new post owned by `user_id`
pub async fn create_post(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    content: &str,
) -> Result<PostRecord, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        INSERT INTO forum_posts (title, content, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, content, created_at, updated_at, user_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Update title and content, stamping `updated_at`
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    title: &str,
    content: &str,
) -> Result<Option<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        UPDATE forum_posts
        SET title = $1, content = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING id, title, content, created_at, updated_at, user_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Delete a post and its comments in one transaction.
///
/// Returns `false` when no post row was removed.
pub async fn delete_post_cascade(pool: &PgPool, post_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed_comments = sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed_posts = sqlx::query("DELETE FROM forum_posts WHERE id = $1")
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    tracing::debug!(post_id, removed_comments, removed_posts, "post cascade delete");
    Ok(removed_posts > 0)
}
