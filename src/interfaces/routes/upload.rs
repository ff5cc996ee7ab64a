use actix_web::web;

use crate::handlers::upload;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/upload")
            .service(
                web::resource("/singleImage")
                    .route(web::post().to(upload::upload_single_image))
            )
            .service(
                web::resource("/multiImages")
                    .route(web::post().to(upload::upload_multi_images))
            )
    );
}
