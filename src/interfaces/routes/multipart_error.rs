use actix_multipart::form::{tempfile::TempFileConfig, MultipartFormConfig};
use actix_web::web;

use crate::{errors::UploadError, settings::AppConfig};

/// Turns multipart extraction failures into failure envelopes so that no
/// upload request ends without one.
pub fn config_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit(config.multipart_total_limit)
            .error_handler(|err, req| {
                tracing::warn!("Multipart extraction failed on {}: {}", req.path(), err);
                UploadError::from(err).into()
            }),
    );

    cfg.app_data(
        TempFileConfig::default()
            .directory(&config.temp_dir)
            .error_handler(|err, req| {
                tracing::error!("Failed to create temp file on {}: {}", req.path(), err);
                UploadError::SaveFailure.into()
            }),
    );
}
