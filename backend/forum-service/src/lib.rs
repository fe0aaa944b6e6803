/// Forum Service Library
///
/// Discussion forum for the weather dashboard: posts, comments, and
/// owner/admin-gated edit and delete, plus a server-rendered forum page.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Records, API shapes and request bodies
/// - `services`: Business logic layer
/// - `db`: Repository trait and PostgreSQL queries
/// - `auth_client`: Client for the external `/auth/me` authenticator
/// - `middleware`: Actor extraction, ownership checks and request metrics
/// - `view`: Client-side forum state, API client and page rendering
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod auth_client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod view;

pub use config::Config;
pub use error::{AppError, Result};
