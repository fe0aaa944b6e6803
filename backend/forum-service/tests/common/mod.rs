//! Test doubles for forum-service integration tests
//!
//! Provides an in-memory `ForumRepository`, a token-based `Authenticator`
//! and a `ForumApi` that runs the real services in-process, so handlers and
//! the view can be exercised without PostgreSQL or an identity service.
#![allow(dead_code)]

use actix_web::ResponseError;
use async_trait::async_trait;
use chrono::Utc;
use forum_service::auth_client::{Authenticator, Credentials};
use forum_service::db::{ForumRepository, SharedRepository};
use forum_service::models::{
    Actor, Author, Comment, CommentRecord, CommentRequest, Post, PostRecord, PostRequest, User,
};
use forum_service::services::{CommentService, PostService};
use forum_service::view::{ApiError, ForumApi};
use forum_service::{AppError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const ADMIN: i64 = 3;

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";
pub const ADMIN_TOKEN: &str = "admin-token";

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    next_post_id: i64,
    next_comment_id: i64,
}

/// `ForumRepository` over plain vectors, enforcing the same foreign keys
/// as the SQL schema.
#[derive(Clone, Default)]
pub struct InMemoryForumRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryForumRepository {
    pub fn new(users: Vec<User>) -> Self {
        let repo = Self::default();
        {
            let mut tables = repo.tables.lock().unwrap();
            tables.users = users.into_iter().map(|u| (u.id, u)).collect();
        }
        repo
    }

    /// Alice and Bob as plain users, plus one admin.
    pub fn with_default_users() -> Self {
        Self::new(vec![
            user(ALICE, "alice", "user"),
            user(BOB, "bob", "user"),
            user(ADMIN, "root", "admin"),
        ])
    }

    pub fn shared(&self) -> SharedRepository {
        Arc::new(self.clone())
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }

    pub fn comments_on(&self, post_id: i64) -> usize {
        self.tables
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .count()
    }
}

pub fn user(id: i64, name: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        role: role.to_string(),
    }
}

fn author(tables: &Tables, user_id: i64) -> Author {
    Author {
        id: user_id,
        name: tables
            .users
            .get(&user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default(),
    }
}

#[async_trait]
impl ForumRepository for InMemoryForumRepository {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let tables = self.tables.lock().unwrap();

        let mut posts: Vec<Post> = tables
            .posts
            .iter()
            .map(|p| {
                let mut comments: Vec<Comment> = tables
                    .comments
                    .iter()
                    .filter(|c| c.post_id == p.id)
                    .map(|c| Comment {
                        id: c.id,
                        content: c.content.clone(),
                        created_at: c.created_at,
                        updated_at: c.updated_at,
                        post_id: c.post_id,
                        user_id: c.user_id,
                        author: author(&tables, c.user_id),
                    })
                    .collect();
                comments.sort_by_key(|c| (c.created_at, c.id));

                Post {
                    id: p.id,
                    title: p.title.clone(),
                    content: p.content.clone(),
                    created_at: p.created_at,
                    updated_at: p.updated_at,
                    user_id: p.user_id,
                    author: author(&tables, p.user_id),
                    comments,
                }
            })
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(posts)
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<PostRecord>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<PostRecord> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains_key(&user_id) {
            return Err(AppError::DatabaseError(
                "insert violates foreign key constraint forum_posts_user_id_fkey".to_string(),
            ));
        }

        tables.next_post_id += 1;
        let post = PostRecord {
            id: tables.next_post_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            user_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<PostRecord>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter_mut().find(|p| p.id == post_id).map(|p| {
            p.title = title.to_string();
            p.content = content.to_string();
            p.updated_at = Some(Utc::now());
            p.clone()
        }))
    }

    async fn delete_post(&self, post_id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        tables.comments.retain(|c| c.post_id != post_id);
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != post_id);
        Ok(tables.posts.len() < before)
    }

    async fn get_comment(&self, comment_id: i64) -> Result<Option<CommentRecord>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.comments.iter().find(|c| c.id == comment_id).cloned())
    }

    async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentRecord> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.posts.iter().any(|p| p.id == post_id) {
            return Err(AppError::DatabaseError(
                "insert violates foreign key constraint comments_post_id_fkey".to_string(),
            ));
        }

        tables.next_comment_id += 1;
        let comment = CommentRecord {
            id: tables.next_comment_id,
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            post_id,
            user_id,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        content: &str,
    ) -> Result<Option<CommentRecord>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .map(|c| {
                c.content = content.to_string();
                c.updated_at = Some(Utc::now());
                c.clone()
            }))
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != comment_id);
        Ok(tables.comments.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Resolves `Authorization: Bearer <token>` against a fixed table.
pub struct StaticAuthenticator {
    tokens: HashMap<String, Actor>,
}

impl StaticAuthenticator {
    pub fn new(tokens: Vec<(&str, Actor)>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(token, actor)| (format!("Bearer {}", token), actor))
                .collect(),
        }
    }

    pub fn with_default_users() -> Self {
        Self::new(vec![
            (ALICE_TOKEN, Actor::new(ALICE, "user")),
            (BOB_TOKEN, Actor::new(BOB, "user")),
            (ADMIN_TOKEN, Actor::new(ADMIN, "admin")),
        ])
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Actor>> {
        Ok(credentials
            .authorization
            .as_ref()
            .and_then(|header| self.tokens.get(header))
            .cloned())
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// `ForumApi` that runs the real services against an in-memory store
/// as a fixed actor. Counts list calls so tests can observe re-fetches.
pub struct InProcessForumApi {
    repo: InMemoryForumRepository,
    actor: Option<Actor>,
    list_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
}

impl InProcessForumApi {
    pub fn new(repo: InMemoryForumRepository, actor: Option<Actor>) -> Self {
        Self {
            repo,
            actor,
            list_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
        }
    }

    pub fn repo(&self) -> &InMemoryForumRepository {
        &self.repo
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    fn posts(&self) -> PostService {
        PostService::new(self.repo.shared())
    }

    fn comments(&self) -> CommentService {
        CommentService::new(self.repo.shared())
    }

    fn actor(&self) -> std::result::Result<Actor, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.actor
            .clone()
            .ok_or_else(|| to_api_error(AppError::Unauthorized("authentication required".into())))
    }
}

fn to_api_error(err: AppError) -> ApiError {
    ApiError::Status {
        status: err.status_code().as_u16(),
        message: err.to_string(),
    }
}

#[async_trait]
impl ForumApi for InProcessForumApi {
    async fn list_posts(&self) -> std::result::Result<Vec<Post>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.posts().list_posts().await.map_err(to_api_error)
    }

    async fn current_actor(&self) -> std::result::Result<Option<Actor>, ApiError> {
        Ok(self.actor.clone())
    }

    async fn create_post(&self, req: &PostRequest) -> std::result::Result<PostRecord, ApiError> {
        let actor = self.actor()?;
        self.posts()
            .create_post(&actor, req.clone())
            .await
            .map_err(to_api_error)
    }

    async fn update_post(
        &self,
        post_id: i64,
        req: &PostRequest,
    ) -> std::result::Result<PostRecord, ApiError> {
        let actor = self.actor()?;
        self.posts()
            .update_post(&actor, post_id, Ok::<_, AppError>(req.clone()))
            .await
            .map_err(to_api_error)
    }

    async fn delete_post(&self, post_id: i64) -> std::result::Result<(), ApiError> {
        let actor = self.actor()?;
        self.posts()
            .delete_post(&actor, post_id)
            .await
            .map_err(to_api_error)
    }

    async fn create_comment(
        &self,
        post_id: i64,
        req: &CommentRequest,
    ) -> std::result::Result<CommentRecord, ApiError> {
        let actor = self.actor()?;
        self.comments()
            .create_comment(&actor, post_id, req.clone())
            .await
            .map_err(to_api_error)
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        req: &CommentRequest,
    ) -> std::result::Result<CommentRecord, ApiError> {
        let actor = self.actor()?;
        self.comments()
            .update_comment(&actor, comment_id, Ok::<_, AppError>(req.clone()))
            .await
            .map_err(to_api_error)
    }

    async fn delete_comment(&self, comment_id: i64) -> std::result::Result<(), ApiError> {
        let actor = self.actor()?;
        self.comments()
            .delete_comment(&actor, comment_id)
            .await
            .map_err(to_api_error)
    }
}
