/// Server-rendered forum page
use crate::auth_client::SharedAuthenticator;
use crate::db::SharedRepository;
use crate::error::Result;
use crate::middleware::resolve_actor;
use crate::services::PostService;
use crate::view::{render_forum_page, ForumState};
use actix_web::{web, HttpRequest, HttpResponse};

/// GET /forum
///
/// Anyone may view the page; if the authenticator cannot be reached the page
/// is rendered for an anonymous visitor.
pub async fn forum_page(
    req: HttpRequest,
    repo: web::Data<SharedRepository>,
    authenticator: web::Data<SharedAuthenticator>,
) -> Result<HttpResponse> {
    let actor = match resolve_actor(authenticator.get_ref(), &req).await {
        Ok(actor) => actor,
        Err(e) => {
            tracing::warn!(error = %e, "Rendering forum page anonymously");
            None
        }
    };

    let posts = PostService::new(repo.get_ref().clone()).list_posts().await?;
    let html = render_forum_page(&ForumState::loaded(posts, actor))?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
