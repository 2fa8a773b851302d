use actix_web::{HttpResponse, Responder, get};
use chrono::Utc;

use super::models::{ApiResponse, HealthResponse};

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(
        ApiResponse::ok(HealthResponse {
            timestamp: Utc::now().to_rfc3339(),
        })
        .with_message("Ledger API is up and running 🦀"),
    )
}
