//! HTTP access to the forum API from the view.

use crate::auth_client::Credentials;
use crate::models::{
    Actor, CommentRecord, CommentRequest, DeleteResponse, Post, PostRecord, PostRequest,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Non-success response; `message` is the server's `error` field.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Calls the view makes against the forum API and the authenticator.
#[async_trait]
pub trait ForumApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `None` when the caller is not signed in.
    async fn current_actor(&self) -> Result<Option<Actor>, ApiError>;

    async fn create_post(&self, req: &PostRequest) -> Result<PostRecord, ApiError>;

    async fn update_post(&self, post_id: i64, req: &PostRequest) -> Result<PostRecord, ApiError>;

    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError>;

    async fn create_comment(
        &self,
        post_id: i64,
        req: &CommentRequest,
    ) -> Result<CommentRecord, ApiError>;

    async fn update_comment(
        &self,
        comment_id: i64,
        req: &CommentRequest,
    ) -> Result<CommentRecord, ApiError>;

    async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `ForumApi` over reqwest, forwarding the signed-in user's credentials.
pub struct HttpForumApi {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpForumApi {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, credentials)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            credentials,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(authorization) = &self.credentials.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(cookie) = &self.credentials.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ForumApi for HttpForumApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        Self::send_json(self.request(Method::GET, "/forum/posts")).await
    }

    async fn current_actor(&self) -> Result<Option<Actor>, ApiError> {
        let response = self.request(Method::GET, "/auth/me").send().await?;
        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<Actor>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => {
                tracing::debug!(%status, "auth/me returned non-OK; treating as signed out");
                Ok(None)
            }
        }
    }

    async fn create_post(&self, req: &PostRequest) -> Result<PostRecord, ApiError> {
        Self::send_json(self.request(Method::POST, "/forum/posts").json(req)).await
    }

    async fn update_post(&self, post_id: i64, req: &PostRequest) -> Result<PostRecord, ApiError> {
        let path = format!("/forum/posts/{}", post_id);
        Self::send_json(self.request(Method::PUT, &path).json(req)).await
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError> {
        let path = format!("/forum/posts/{}", post_id);
        let _: DeleteResponse = Self::send_json(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn create_comment(
        &self,
        post_id: i64,
        req: &CommentRequest,
    ) -> Result<CommentRecord, ApiError> {
        let path = format!("/forum/posts/{}/comments", post_id);
        Self::send_json(self.request(Method::POST, &path).json(req)).await
    }

    async fn update_comment(
        &self,
        comment_id: i64,
        req: &CommentRequest,
    ) -> Result<CommentRecord, ApiError> {
        let path = format!("/forum/comments/{}", comment_id);
        Self::send_json(self.request(Method::PUT, &path).json(req)).await
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        let path = format!("/forum/comments/{}", comment_id);
        let _: DeleteResponse = Self::send_json(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpForumApi::new("http://localhost:8080/", Credentials::default());
        assert_eq!(api.base_url, "http://localhost:8080");
    }

    #[test]
    fn status_error_displays_server_message() {
        let err = ApiError::Status {
            status: 403,
            message: "Forbidden: You don't have permission to modify this post".into(),
        };
        assert_eq!(
            err.to_string(),
            "Forbidden: You don't have permission to modify this post"
        );
        assert_eq!(err.status(), Some(403));
    }
}
