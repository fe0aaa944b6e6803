/// Data models for forum-service
///
/// Rows read from the store are decoded into the `*Record` / `*Row` types
/// below and converted into the API shapes (`Post`, `Comment`) before they
/// leave the repository layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role value that bypasses ownership checks.
pub const ADMIN_ROLE: &str = "admin";

/// Identity resolved by the authenticator for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub role: String,
}

impl Actor {
    pub fn new(id: i64, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Row of the `users` table. Owned by the identity system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// Author summary embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Row of the `forum_posts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: i64,
}

/// Row of the `comments` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub post_id: i64,
    pub user_id: i64,
}

/// `forum_posts` joined with `users.name`.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: i64,
    pub author_name: String,
}

/// `comments` joined with `users.name`.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorRow {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub post_id: i64,
    pub user_id: i64,
    pub author_name: String,
}

/// A post as listed by `GET /forum/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: i64,
    pub author: Author,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment embedded in a listed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub post_id: i64,
    pub user_id: i64,
    pub author: Author,
}

impl From<PostWithAuthorRow> for Post {
    fn from(row: PostWithAuthorRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user_id: row.user_id,
            author: Author {
                id: row.user_id,
                name: row.author_name,
            },
            comments: Vec::new(),
        }
    }
}

impl From<CommentWithAuthorRow> for Comment {
    fn from(row: CommentWithAuthorRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
            post_id: row.post_id,
            user_id: row.user_id,
            author: Author {
                id: row.user_id,
                name: row.author_name,
            },
        }
    }
}

/// Body of `POST /forum/posts` and `PUT /forum/posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(required)]
    pub title: Option<String>,
    #[validate(required)]
    pub content: Option<String>,
}

impl PostRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Validated `(title, content)`; blank values count as missing.
    pub fn into_fields(self) -> crate::error::Result<(String, String)> {
        let normalized = Self {
            title: non_blank(self.title),
            content: non_blank(self.content),
        };
        normalized.validate()?;

        match (normalized.title, normalized.content) {
            (Some(title), Some(content)) => Ok((title, content)),
            _ => Err(crate::error::AppError::ValidationError(
                "title and content are required".to_string(),
            )),
        }
    }
}

/// Body of `POST /forum/posts/{id}/comments` and `PUT /forum/comments/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(required)]
    pub content: Option<String>,
}

impl CommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Validated content; a blank value counts as missing.
    pub fn into_content(self) -> crate::error::Result<String> {
        let normalized = Self {
            content: non_blank(self.content),
        };
        normalized.validate()?;

        normalized.content.ok_or_else(|| {
            crate::error::AppError::ValidationError("content is required".to_string())
        })
    }
}

/// `{ "success": true }` returned by the delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
