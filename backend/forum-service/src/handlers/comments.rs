/// Comment handlers - HTTP endpoints for comment operations
use crate::db::SharedRepository;
use crate::metrics::record_mutation;
use crate::models::{Actor, CommentRequest, DeleteResponse};
use crate::services::CommentService;
use actix_web::{web, HttpResponse};

fn service(repo: &web::Data<SharedRepository>) -> CommentService {
    CommentService::new(repo.get_ref().clone())
}

/// Create a new comment
/// POST /forum/posts/{id}/comments
pub async fn create_comment(
    repo: web::Data<SharedRepository>,
    post_id: web::Path<i64>,
    actor: Actor,
    body: web::Json<CommentRequest>,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .create_comment(&actor, post_id.into_inner(), body.into_inner())
        .await
        .map_err(actix_web::Error::from);
    record_mutation("comment", "create", &result);

    Ok(HttpResponse::Created().json(result?))
}

/// Update a comment
/// PUT /forum/comments/{id}
pub async fn update_comment(
    repo: web::Data<SharedRepository>,
    comment_id: web::Path<i64>,
    actor: Actor,
    body: actix_web::Result<web::Json<CommentRequest>>,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .update_comment(
            &actor,
            comment_id.into_inner(),
            body.map(web::Json::into_inner),
        )
        .await;
    record_mutation("comment", "update", &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Delete a comment
/// DELETE /forum/comments/{id}
pub async fn delete_comment(
    repo: web::Data<SharedRepository>,
    comment_id: web::Path<i64>,
    actor: Actor,
) -> actix_web::Result<HttpResponse> {
    let result = service(&repo)
        .delete_comment(&actor, comment_id.into_inner())
        .await
        .map_err(actix_web::Error::from);
    record_mutation("comment", "delete", &result);
    result?;

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}
