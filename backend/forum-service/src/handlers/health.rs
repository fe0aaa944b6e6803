/// Health check endpoints
use crate::db::SharedRepository;
use actix_web::{web, HttpResponse};

/// GET /health
pub async fn health_summary(repo: web::Data<SharedRepository>) -> HttpResponse {
    match repo.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "forum-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": format!("PostgreSQL connection failed: {}", e),
                "service": "forum-service"
            }))
        }
    }
}

/// GET /health/live
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
