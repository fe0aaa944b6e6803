//! Server-rendered forum page.

use crate::error::Result;
use crate::view::state::ForumState;
use askama::Template;
use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct CommentCard {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub created: String,
    pub edited: bool,
    pub can_modify: bool,
    pub editing: bool,
}

pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: String,
    pub edited: bool,
    pub can_modify: bool,
    pub editing: bool,
    pub liked: bool,
    pub comment_draft: String,
    pub comments: Vec<CommentCard>,
}

#[derive(Template)]
#[template(path = "forum.html")]
pub struct ForumPageTemplate {
    pub signed_in: bool,
    pub actor_label: String,
    pub alert: Option<String>,
    pub new_title: String,
    pub new_content: String,
    pub posts: Vec<PostCard>,
}

impl ForumPageTemplate {
    pub fn from_state(state: &ForumState) -> Self {
        let editing_post = state.editing_post.as_ref().map(|e| e.post_id);
        let editing_comment = state.editing_comment.as_ref().map(|e| e.comment_id);

        let posts = state
            .posts
            .iter()
            .map(|post| PostCard {
                id: post.id,
                title: post.title.clone(),
                content: post.content.clone(),
                author: post.author.name.clone(),
                created: format_time(&post.created_at),
                edited: post.updated_at.is_some(),
                can_modify: state.can_modify(post.user_id),
                editing: editing_post == Some(post.id),
                liked: state.is_liked(post.id),
                comment_draft: state.comment_draft(post.id).to_string(),
                comments: post
                    .comments
                    .iter()
                    .map(|comment| CommentCard {
                        id: comment.id,
                        content: comment.content.clone(),
                        author: comment.author.name.clone(),
                        created: format_time(&comment.created_at),
                        edited: comment.updated_at.is_some(),
                        can_modify: state.can_modify(comment.user_id),
                        editing: editing_comment == Some(comment.id),
                    })
                    .collect(),
            })
            .collect();

        let actor_label = match &state.actor {
            Some(actor) if actor.is_admin() => format!("user #{} (admin)", actor.id),
            Some(actor) => format!("user #{}", actor.id),
            None => String::new(),
        };

        Self {
            signed_in: state.actor.is_some(),
            actor_label,
            alert: state.alert.clone(),
            new_title: state.new_post.title.clone(),
            new_content: state.new_post.content.clone(),
            posts,
        }
    }
}

/// Render the full forum page for `state`.
pub fn render_forum_page(state: &ForumState) -> Result<String> {
    Ok(ForumPageTemplate::from_state(state).render()?)
}

fn format_time(at: &DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}
