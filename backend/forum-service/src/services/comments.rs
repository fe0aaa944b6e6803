/// Comment service - creation and ownership-gated update and delete
use crate::db::ForumRepository;
use crate::error::{AppError, Result};
use crate::middleware::check_ownership;
use crate::models::{Actor, CommentRecord, CommentRequest};
use std::sync::Arc;

pub struct CommentService {
    repo: Arc<dyn ForumRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn ForumRepository>) -> Self {
        Self { repo }
    }

    /// Create a comment on `post_id`.
    ///
    /// The post is not looked up first; the store's foreign key rejects
    /// comments on missing posts.
    pub async fn create_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<CommentRecord> {
        let content = req.into_content()?;
        let comment = self.repo.create_comment(post_id, actor.id, &content).await?;

        tracing::info!(
            comment_id = comment.id,
            post_id,
            actor_id = actor.id,
            "Comment created"
        );
        Ok(comment)
    }

    /// Replace the content of a comment the actor may modify; `req` is
    /// inspected after the existence and ownership checks.
    pub async fn update_comment<E: From<AppError>>(
        &self,
        actor: &Actor,
        comment_id: i64,
        req: std::result::Result<CommentRequest, E>,
    ) -> std::result::Result<CommentRecord, E> {
        let existing = self.find_comment(comment_id).await?;
        check_ownership(actor, &existing)?;

        let content = req?.into_content()?;
        let comment = self
            .repo
            .update_comment(comment_id, &content)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))?;

        tracing::info!(comment_id, actor_id = actor.id, "Comment updated");
        Ok(comment)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, actor: &Actor, comment_id: i64) -> Result<()> {
        let existing = self.find_comment(comment_id).await?;
        check_ownership(actor, &existing)?;

        if !self.repo.delete_comment(comment_id).await? {
            return Err(comment_not_found(comment_id));
        }

        tracing::info!(comment_id, actor_id = actor.id, "Comment deleted");
        Ok(())
    }

    async fn find_comment(&self, comment_id: i64) -> Result<CommentRecord> {
        self.repo
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))
    }
}

fn comment_not_found(comment_id: i64) -> AppError {
    AppError::NotFound(format!("comment {} does not exist", comment_id))
}
