use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::{handlers::home::home, settings::AppConfig};

pub fn config_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.service(Files::new(&format!("/{}", config.url_prefix), &config.image_dir));

    if Path::new(&config.public_dir).is_dir() {
        cfg.service(Files::new("/", &config.public_dir).index_file("index.html"));
    } else {
        tracing::debug!("Public directory {} not found, serving JSON home", config.public_dir);
        cfg.route("/", web::get().to(home));
    }
}
