use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::error;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

/// Health check endpoint
///
/// Probes database connectivity. Use for load balancers and uptime monitors.
/// Returns 503 while the store is unreachable; recovers on its own when the
/// store comes back.
#[get("/health")]
async fn health_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            database: "connected",
        }),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy",
                database: "disconnected",
            })
        }
    }
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config.service(health_check);
}
