//! Client for the external authenticator.
//!
//! The authenticator owns sessions and tokens. This service only forwards the
//! caller's credentials to `GET /auth/me` and reads back `{id, role}`.

use crate::config::AuthConfig;
use crate::error::{AppError, Result};
use crate::models::Actor;
use actix_web::http::header;
use actix_web::HttpRequest;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Credentials lifted from an incoming request, forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub authorization: Option<String>,
    pub cookie: Option<String>,
}

impl Credentials {
    pub fn from_request(req: &HttpRequest) -> Self {
        let read = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            authorization: read(header::AUTHORIZATION),
            cookie: read(header::COOKIE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authorization.is_none() && self.cookie.is_none()
    }
}

/// Resolves credentials to an actor; `Ok(None)` means unauthenticated.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Actor>>;
}

pub type SharedAuthenticator = Arc<dyn Authenticator>;

/// `Authenticator` backed by the identity service's `GET /auth/me`.
pub struct HttpAuthenticator {
    client: reqwest::Client,
    me_url: String,
}

impl HttpAuthenticator {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            me_url: format!("{}/auth/me", config.service_url.trim_end_matches('/')),
        })
    }

    pub fn me_url(&self) -> &str {
        &self.me_url
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Actor>> {
        if credentials.is_empty() {
            return Ok(None);
        }

        let mut request = self.client.get(&self.me_url);
        if let Some(authorization) = &credentials.authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(cookie) = &credentials.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, url = %self.me_url, "Auth service unreachable");
            AppError::from(e)
        })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Auth service rejected credentials");
            return Ok(None);
        }

        let actor = response.json::<Actor>().await?;
        Ok(Some(actor))
    }
}
