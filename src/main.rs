use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use image_upload::{
    background_task::start_temp_sweep_task,
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    if origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => {
            init_tracing(cfg.is_production());
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));

    if let Err(e) = app_state.upload_handler.store.ensure_root().await {
        tracing::error!("Cannot prepare image directory {}: {}", config.image_dir, e);
        std::process::exit(1);
    }
    tokio::fs::create_dir_all(&config.temp_dir).await?;

    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let sweep = start_temp_sweep_task(
        config.temp_dir.clone().into(),
        Duration::from_secs(config.temp_sweep_interval_secs),
        Duration::from_secs(config.temp_max_age_secs),
    );

    let workers = config.worker_count;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&config))
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, &config))
    })
    .workers(workers)
    .bind(server_addr)?
    .run();

    tokio::spawn(sweep);

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
