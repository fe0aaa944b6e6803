/// Forum view
///
/// `ForumView` drives the page: it owns a `ForumState`, talks to the API
/// through a `ForumApi`, and re-fetches the whole post list after every
/// successful mutation. Failed calls are logged, surfaced through
/// `ForumState::alert`, and otherwise leave the state as it was.
pub mod client;
pub mod page;
pub mod state;

pub use client::{ApiError, ForumApi, HttpForumApi};
pub use page::{render_forum_page, ForumPageTemplate};
pub use state::{CommentEdit, ForumState, PostDraft, PostEdit};

use crate::models::{CommentRequest, PostRequest};

pub struct ForumView<A: ForumApi> {
    api: A,
    state: ForumState,
}

impl<A: ForumApi> ForumView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ForumState::default(),
        }
    }

    pub fn state(&self) -> &ForumState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial load: posts and current actor are fetched concurrently.
    pub async fn mount(&mut self) {
        let (posts, actor) = tokio::join!(self.api.list_posts(), self.api.current_actor());

        match posts {
            Ok(posts) => self.state.replace_posts(posts),
            Err(err) => self.fail("load posts", err),
        }
        match actor {
            Ok(actor) => self.state.actor = actor,
            Err(err) => {
                tracing::warn!(error = %err, "Could not resolve current user");
                self.state.actor = None;
            }
        }
    }

    /// Replace the post list with a fresh fetch.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_posts().await {
            Ok(posts) => {
                self.state.replace_posts(posts);
                true
            }
            Err(err) => {
                self.fail("load posts", err);
                false
            }
        }
    }

    // ---------------------------------------------------------------
    // Posts
    // ---------------------------------------------------------------

    pub fn set_new_post(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.state.new_post = PostDraft {
            title: title.into(),
            content: content.into(),
        };
    }

    /// Submit the new-post draft. Incomplete drafts are not sent.
    pub async fn submit_post(&mut self) -> bool {
        if !self.state.new_post.is_complete() {
            return false;
        }

        let draft = &self.state.new_post;
        let req = PostRequest::new(draft.title.clone(), draft.content.clone());
        match self.api.create_post(&req).await {
            Ok(_) => {
                self.state.new_post = PostDraft::default();
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("create post", err);
                false
            }
        }
    }

    pub fn start_post_edit(&mut self, post_id: i64) -> bool {
        self.state.start_post_edit(post_id)
    }

    pub fn set_post_edit(&mut self, title: impl Into<String>, content: impl Into<String>) {
        if let Some(edit) = self.state.editing_post.as_mut() {
            edit.title = title.into();
            edit.content = content.into();
        }
    }

    pub fn cancel_post_edit(&mut self) {
        self.state.cancel_post_edit();
    }

    /// Save the open post edit; the slot stays open if the call fails.
    /// Blank fields are not sent.
    pub async fn save_post_edit(&mut self) -> bool {
        let Some(edit) = self.state.editing_post.clone() else {
            return false;
        };
        if edit.title.trim().is_empty() || edit.content.trim().is_empty() {
            return false;
        }

        let req = PostRequest::new(edit.title, edit.content);
        match self.api.update_post(edit.post_id, &req).await {
            Ok(_) => {
                self.state.editing_post = None;
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("update post", err);
                false
            }
        }
    }

    pub async fn delete_post(&mut self, post_id: i64) -> bool {
        match self.api.delete_post(post_id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("delete post", err);
                false
            }
        }
    }

    /// Local-only like toggle; nothing is sent to the server.
    pub fn toggle_like(&mut self, post_id: i64) -> bool {
        self.state.toggle_like(post_id)
    }

    // ---------------------------------------------------------------
    // Comments
    // ---------------------------------------------------------------

    pub fn set_comment_draft(&mut self, post_id: i64, content: impl Into<String>) {
        self.state.set_comment_draft(post_id, content);
    }

    /// Submit the comment draft for `post_id`. Blank drafts are not sent.
    pub async fn submit_comment(&mut self, post_id: i64) -> bool {
        let content = self.state.comment_draft(post_id).to_string();
        if content.trim().is_empty() {
            return false;
        }

        match self
            .api
            .create_comment(post_id, &CommentRequest::new(content))
            .await
        {
            Ok(_) => {
                self.state.comment_drafts.remove(&post_id);
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("create comment", err);
                false
            }
        }
    }

    pub fn start_comment_edit(&mut self, comment_id: i64) -> bool {
        self.state.start_comment_edit(comment_id)
    }

    pub fn set_comment_edit(&mut self, content: impl Into<String>) {
        if let Some(edit) = self.state.editing_comment.as_mut() {
            edit.content = content.into();
        }
    }

    pub fn cancel_comment_edit(&mut self) {
        self.state.cancel_comment_edit();
    }

    /// Save the open comment edit; the slot stays open if the call fails.
    /// Blank content is not sent.
    pub async fn save_comment_edit(&mut self) -> bool {
        let Some(edit) = self.state.editing_comment.clone() else {
            return false;
        };
        if edit.content.trim().is_empty() {
            return false;
        }

        match self
            .api
            .update_comment(edit.comment_id, &CommentRequest::new(edit.content))
            .await
        {
            Ok(_) => {
                self.state.editing_comment = None;
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("update comment", err);
                false
            }
        }
    }

    pub async fn delete_comment(&mut self, comment_id: i64) -> bool {
        match self.api.delete_comment(comment_id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("delete comment", err);
                false
            }
        }
    }

    fn fail(&mut self, action: &str, err: ApiError) {
        tracing::error!(action, error = %err, "Forum request failed");
        self.state.alert = Some(err.to_string());
    }
}
