use actix_multipart::form::{MultipartCollect, MultipartForm};
use actix_web::{http::header::CONTENT_TYPE, web, HttpResponse};

use crate::{
    entities::{
        envelope::ResponseEnvelope,
        upload::{MultiImagesForm, SingleImageForm, UploadRequest},
    },
    errors::UploadError,
    AppState,
};

pub async fn upload_single_image(
    state: web::Data<AppState>,
    form_input: Result<MultipartForm<SingleImageForm>, actix_web::Error>,
) -> Result<HttpResponse, UploadError> {
    let form = extract_form(form_input)?;
    let request = form.file.map(UploadRequest::from);

    let image = state.upload_handler.process(request).await?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::ok(image.url)))
}

pub async fn upload_multi_images(
    state: web::Data<AppState>,
    form_input: Result<MultipartForm<MultiImagesForm>, actix_web::Error>,
) -> Result<HttpResponse, UploadError> {
    let form = extract_form(form_input)?;
    let max_files = state.upload_handler.settings.max_batch_files;
    if form.files.len() > max_files {
        tracing::warn!("Rejected batch of {} files (max {})", form.files.len(), max_files);
        return Err(UploadError::TooManyFiles(max_files));
    }

    let requests = form.files.into_iter().map(UploadRequest::from).collect();

    let results = state.upload_handler.process_all(requests).await?;

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ResponseEnvelope::ok(results)))
}

fn extract_form<T: MultipartCollect>(
    form_input: Result<MultipartForm<T>, actix_web::Error>,
) -> Result<T, UploadError> {
    match form_input {
        Ok(MultipartForm(form)) => Ok(form),
        Err(e) => {
            tracing::warn!("Upload form rejected: {}", e);
            Err(UploadError::from_extractor(&e))
        }
    }
}
