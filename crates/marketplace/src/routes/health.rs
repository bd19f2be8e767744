use actix_web::HttpResponse;
use marketplace_env::logger;

/// Liveness probe.
pub async fn health() -> HttpResponse {
    logger::info!("health was called");
    HttpResponse::Ok().body("health is good")
}
