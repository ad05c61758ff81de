use crate::services::PostService;
use actix_web::{web, HttpResponse};

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Hello to Memories API")
}

/// Store round-trip; 503 when the database is unreachable
pub async fn health_summary(service: web::Data<PostService>) -> HttpResponse {
    match service.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "posts-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": e.to_string(),
            "service": "posts-service"
        })),
    }
}
