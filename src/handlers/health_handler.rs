use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::app_state::AppState;

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Not ready once shutdown has begun. The model service is not probed; a
/// readiness check must not spend model quota.
#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let shutting_down = state.shutdown.is_cancelled();
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();

    let response = serde_json::json!({
        "status": if shutting_down { "not_ready" } else { "ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": uptime_secs,
        "dependencies": {
            "model": state.config.model_name,
        }
    });

    if shutting_down {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}
