use actix_web::{HttpResponse, Responder};

pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Image upload service",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/upload/singleImage",
            "POST /api/upload/multiImages"
        ]
    }))
}
