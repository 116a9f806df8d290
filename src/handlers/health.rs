use actix_web::{HttpResponse, Result, web};

use crate::models::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Result<HttpResponse> {
    // Liveness only; deliberately does not touch the database
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    }))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
