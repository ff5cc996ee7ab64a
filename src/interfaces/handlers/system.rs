use actix_web::{get, web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use tokio::fs;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    version: String,
    image_dir: String,
    storage: String,
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let image_dir = &state.upload_handler.settings.image_dir;
    let storage = match fs::metadata(image_dir).await {
        Ok(meta) if meta.is_dir() => "OK",
        Ok(_) => "Not a directory",
        Err(e) => {
            tracing::warn!("HealthCheck cannot stat {}: {}", image_dir.display(), e);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        image_dir: image_dir.display().to_string(),
        storage: storage.to_string(),
    })
}
