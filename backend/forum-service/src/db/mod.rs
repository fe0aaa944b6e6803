/// Database access layer
///
/// `ForumRepository` is the boundary to the relational store. Everything
/// above it works with typed records only; `SqlxForumRepository` is the
/// PostgreSQL implementation backed by the query functions in
/// `post_repo` and `comment_repo`.
pub mod comment_repo;
pub mod post_repo;

use crate::error::Result;
use crate::models::{CommentRecord, Post, PostRecord};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

pub type SharedRepository = Arc<dyn ForumRepository>;

#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Every post with author and comments, newest post first.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn get_post(&self, post_id: i64) -> Result<Option<PostRecord>>;

    async fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<PostRecord>;

    async fn update_post(
        &self,
        post_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<PostRecord>>;

    /// Removes the post and every comment referencing it.
    async fn delete_post(&self, post_id: i64) -> Result<bool>;

    async fn get_comment(&self, comment_id: i64) -> Result<Option<CommentRecord>>;

    async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentRecord>;

    async fn update_comment(&self, comment_id: i64, content: &str)
        -> Result<Option<CommentRecord>>;

    async fn delete_comment(&self, comment_id: i64) -> Result<bool>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct SqlxForumRepository {
    pool: PgPool,
}

impl SqlxForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumRepository for SqlxForumRepository {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(post_repo::list_posts_with_comments(&self.pool).await?)
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<PostRecord>> {
        Ok(post_repo::get_post_by_id(&self.pool, post_id).await?)
    }

    async fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<PostRecord> {
        Ok(post_repo::create_post(&self.pool, user_id, title, content).await?)
    }

    async fn update_post(
        &self,
        post_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<PostRecord>> {
        Ok(post_repo::update_post(&self.pool, post_id, title, content).await?)
    }

    async fn delete_post(&self, post_id: i64) -> Result<bool> {
        Ok(post_repo::delete_post_cascade(&self.pool, post_id).await?)
    }

    async fn get_comment(&self, comment_id: i64) -> Result<Option<CommentRecord>> {
        Ok(comment_repo::get_comment_by_id(&self.pool, comment_id).await?)
    }

    async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentRecord> {
        Ok(comment_repo::create_comment(&self.pool, post_id, user_id, content).await?)
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        content: &str,
    ) -> Result<Option<CommentRecord>> {
        Ok(comment_repo::update_comment(&self.pool, comment_id, content).await?)
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<bool> {
        Ok(comment_repo::delete_comment(&self.pool, comment_id).await?)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
