/// Post handlers - HTTP endpoints for post operations
use crate::db::SharedRepository;
use crate::error::Result;
use crate::metrics::record_mutation;
use crate::models::{Actor, DeleteResponse, PostRequest};
use crate::services::PostService;
use actix_web::{web, HttpResponse};

fn service(repo: &web::Data<SharedRepository>) -> PostService {
    PostService::new(repo.get_ref().clone())
}

/// List all posts with authors and comments
/// GET /forum/posts
pub async fn list_posts(repo: web::Data<SharedRepository>) -> Result<HttpResponse> {
    let posts = service(&repo).list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
/// POST /forum/posts
pub async fn create_post(
    repo: web::Data<SharedRepository>,
    actor: Actor,
    body: web::Json<PostRequest>,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .create_post(&actor, body.into_inner())
        .await
        .map_err(actix_web::Error::from);
    record_mutation("post", "create", &result);

    Ok(HttpResponse::Created().json(result?))
}

/// Update a post's title and content
/// PUT /forum/posts/{id}
///
/// The body is extracted as a `Result` so that a bad payload is reported
/// only after the post is found and the actor may modify it.
pub async fn update_post(
    repo: web::Data<SharedRepository>,
    post_id: web::Path<i64>,
    actor: Actor,
    body: actix_web::Result<web::Json<PostRequest>>,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .update_post(
            &actor,
            post_id.into_inner(),
            body.map(web::Json::into_inner),
        )
        .await;
    record_mutation("post", "update", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Delete a post and its comments
/// DELETE /forum/posts/{id}
pub async fn delete_post(
    repo: web::Data<SharedRepository>,
    post_id: web::Path<i64>,
    actor: Actor,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .delete_post(&actor, post_id.into_inner())
        .await
        .map_err(actix_web::Error::from);
    record_mutation("post", "delete", &result);
    result?;

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}
