//! Client-side state of the forum page.
//!
//! The post list is only ever replaced wholesale from a fresh fetch; drafts
//! and edit slots live beside it and are keyed by id.

use crate::middleware::is_owner_or_admin;
use crate::models::{Actor, Comment, Post};
use std::collections::{HashMap, HashSet};

/// Draft for the "new post" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// The single post currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEdit {
    pub post_id: i64,
    pub title: String,
    pub content: String,
}

/// The single comment currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEdit {
    pub comment_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ForumState {
    pub posts: Vec<Post>,
    pub actor: Option<Actor>,
    pub new_post: PostDraft,
    /// Pending comment text per post id.
    pub comment_drafts: HashMap<i64, String>,
    pub editing_post: Option<PostEdit>,
    pub editing_comment: Option<CommentEdit>,
    /// Posts liked in this session only; never persisted.
    pub liked: HashSet<i64>,
    /// Last error message to show the user.
    pub alert: Option<String>,
}

impl ForumState {
    /// State for a freshly loaded page.
    pub fn loaded(posts: Vec<Post>, actor: Option<Actor>) -> Self {
        Self {
            posts,
            actor,
            ..Self::default()
        }
    }

    /// Swap in a freshly fetched post list.
    ///
    /// Drafts and edit slots whose target disappeared are dropped.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;

        let post_ids: HashSet<i64> = self.posts.iter().map(|p| p.id).collect();
        self.comment_drafts.retain(|post_id, _| post_ids.contains(post_id));
        self.liked.retain(|post_id| post_ids.contains(post_id));

        let stale_post_edit = self
            .editing_post
            .as_ref()
            .map_or(false, |edit| !post_ids.contains(&edit.post_id));
        if stale_post_edit {
            self.editing_post = None;
        }

        let stale_comment_edit = self
            .editing_comment
            .as_ref()
            .map_or(false, |edit| self.comment(edit.comment_id).is_none());
        if stale_comment_edit {
            self.editing_comment = None;
        }
    }

    pub fn post(&self, post_id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn comment(&self, comment_id: i64) -> Option<&Comment> {
        self.posts
            .iter()
            .flat_map(|p| p.comments.iter())
            .find(|c| c.id == comment_id)
    }

    /// Whether edit/delete controls are shown for a resource owned by `owner_id`.
    ///
    /// Display only; the server re-checks on every mutation.
    pub fn can_modify(&self, owner_id: i64) -> bool {
        self.actor
            .as_ref()
            .map(|actor| is_owner_or_admin(actor, owner_id))
            .unwrap_or(false)
    }

    pub fn comment_draft(&self, post_id: i64) -> &str {
        self.comment_drafts
            .get(&post_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_comment_draft(&mut self, post_id: i64, content: impl Into<String>) {
        self.comment_drafts.insert(post_id, content.into());
    }

    /// Open the post edit slot, prefilled from the listed post.
    ///
    /// Leaves any comment edit untouched.
    pub fn start_post_edit(&mut self, post_id: i64) -> bool {
        let Some(post) = self.post(post_id) else {
            return false;
        };
        self.editing_post = Some(PostEdit {
            post_id,
            title: post.title.clone(),
            content: post.content.clone(),
        });
        true
    }

    pub fn cancel_post_edit(&mut self) {
        self.editing_post = None;
    }

    /// Open the comment edit slot, prefilled from the listed comment.
    ///
    /// Leaves any post edit untouched.
    pub fn start_comment_edit(&mut self, comment_id: i64) -> bool {
        let Some(comment) = self.comment(comment_id) else {
            return false;
        };
        self.editing_comment = Some(CommentEdit {
            comment_id,
            content: comment.content.clone(),
        });
        true
    }

    pub fn cancel_comment_edit(&mut self) {
        self.editing_comment = None;
    }

    /// Flip the local like flag; returns the new value.
    pub fn toggle_like(&mut self, post_id: i64) -> bool {
        if self.liked.remove(&post_id) {
            false
        } else {
            self.liked.insert(post_id);
            true
        }
    }

    pub fn is_liked(&self, post_id: i64) -> bool {
        self.liked.contains(&post_id)
    }
}
