/// HTTP handlers for forum endpoints
///
/// - Posts: list, create, update and delete posts
/// - Comments: create, update and delete comments on a post
/// - Auth: current actor passthrough for the page
/// - Forum page: server-rendered HTML view
/// - Health: liveness and database readiness
pub mod auth;
pub mod comments;
pub mod forum_page;
pub mod health;
pub mod posts;

use crate::error::json_error_handler;
use actix_web::web;

// Re-export handler functions at module level
pub use auth::current_actor;
pub use comments::{create_comment, delete_comment, update_comment};
pub use forum_page::forum_page;
pub use health::{health_summary, liveness_check};
pub use posts::{create_post, delete_post, list_posts, update_post};

/// JSON extractor settings shared by every JSON endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Register every forum route. Expects `web::Data<SharedRepository>` and
/// `web::Data<SharedAuthenticator>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_summary))
        .route("/health/live", web::get().to(liveness_check))
        .route("/auth/me", web::get().to(current_actor))
        .service(
            web::scope("/forum")
                .route("", web::get().to(forum_page))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(list_posts))
                        .route(web::post().to(create_post)),
                )
                .service(
                    web::resource("/posts/{post_id}")
                        .route(web::put().to(update_post))
                        .route(web::delete().to(delete_post)),
                )
                .route("/posts/{post_id}/comments", web::post().to(create_comment))
                .service(
                    web::resource("/comments/{comment_id}")
                        .route(web::put().to(update_comment))
                        .route(web::delete().to(delete_comment)),
                ),
        );
}
