use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/version").route(web::get().to(get_version)));
}

async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.db.clone();
    web::block(move || db.ping()).await??;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs()
    })))
}

async fn get_version() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "version": VERSION
    }))
}
