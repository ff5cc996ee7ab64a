use actix_web::web;

use crate::{handlers::system::health_check, settings::AppConfig};

mod multipart_error;
mod static_files;
mod upload;

pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(upload::config_routes)
    );

    multipart_error::config_routes(cfg, config);

    // Mounted last: the public directory is served from `/`.
    static_files::config_routes(cfg, config);
}
