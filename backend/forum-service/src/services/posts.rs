/// Post service - listing, creation, ownership-gated update and delete
use crate::db::ForumRepository;
use crate::error::{AppError, Result};
use crate::middleware::check_ownership;
use crate::models::{Actor, Post, PostRecord, PostRequest};
use std::sync::Arc;

pub struct PostService {
    repo: Arc<dyn ForumRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn ForumRepository>) -> Self {
        Self { repo }
    }

    /// All posts with authors and comments, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.repo.list_posts().await
    }

    /// Create a post owned by `actor`
    pub async fn create_post(&self, actor: &Actor, req: PostRequest) -> Result<PostRecord> {
        let (title, content) = req.into_fields()?;
        let post = self.repo.create_post(actor.id, &title, &content).await?;

        tracing::info!(post_id = post.id, actor_id = actor.id, "Post created");
        Ok(post)
    }

    /// Replace title and content of a post the actor may modify.
    ///
    /// `req` is only inspected after the existence and ownership checks, so
    /// an unreadable body never masks a 404 or 403.
    pub async fn update_post<E: From<AppError>>(
        &self,
        actor: &Actor,
        post_id: i64,
        req: std::result::Result<PostRequest, E>,
    ) -> std::result::Result<PostRecord, E> {
        let existing = self.find_post(post_id).await?;
        check_ownership(actor, &existing)?;

        let (title, content) = req?.into_fields()?;
        let post = self
            .repo
            .update_post(post_id, &title, &content)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        tracing::info!(post_id, actor_id = actor.id, "Post updated");
        Ok(post)
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, actor: &Actor, post_id: i64) -> Result<()> {
        let existing = self.find_post(post_id).await?;
        check_ownership(actor, &existing)?;

        if !self.repo.delete_post(post_id).await? {
            return Err(post_not_found(post_id));
        }

        tracing::info!(post_id, actor_id = actor.id, "Post deleted");
        Ok(())
    }

    async fn find_post(&self, post_id: i64) -> Result<PostRecord> {
        self.repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }
}

fn post_not_found(post_id: i64) -> AppError {
    AppError::NotFound(format!("post {} does not exist", post_id))
}
