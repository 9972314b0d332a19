use actix_web::{web, HttpResponse, Responder};

use crate::models::{CatalogResponse, HealthResponse};
use crate::routes::AppState;

/// Configure catalog listing, health and root routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/all-yojana-data", web::get().to(all_schemes));
}

async fn index() -> impl Responder {
    HttpResponse::Ok().body("Hello from Backend!")
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.store.backend_name().to_string(),
        schemes: state.matcher.catalog().len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full scheme catalog
///
/// GET /all-yojana-data
async fn all_schemes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CatalogResponse {
        message: "All Yojana Data",
        data: state.matcher.catalog().records(),
    })
}
