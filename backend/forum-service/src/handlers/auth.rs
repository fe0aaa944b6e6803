/// Current-actor passthrough so the page can resolve its user from the
/// same origin.
use crate::error::Result;
use crate::models::Actor;
use actix_web::HttpResponse;

/// GET /auth/me
pub async fn current_actor(actor: Actor) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(actor))
}
