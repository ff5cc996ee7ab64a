use std::io;

use actix_multipart::MultipartError;
use actix_web::{
    error::ResponseError,
    http::StatusCode,
    HttpResponse,
};
use derive_more::Display;

use crate::entities::envelope::ResponseEnvelope;

/// Every failure a client can observe from the upload endpoints.
///
/// All variants are rendered as a failure envelope (`code: 400`) carried by
/// an HTTP 200 response; the `code` field is the status signal.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[display("no file detected")]
    MissingFile,

    #[display("malformed image name")]
    MalformedName,

    #[display("unsupported image type: {_0}")]
    UnsupportedExtension(String),

    #[display("image too large, please keep it within {_0} bytes")]
    OversizedFile(u64),

    #[display("image save error")]
    SaveFailure,

    #[display("no files detected")]
    EmptyBatch,

    #[display("too many files, at most {_0} per request")]
    TooManyFiles(usize),

    #[display("invalid upload request: {_0}")]
    InvalidRequest(String),
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ResponseEnvelope::<()>::error(self.to_string()))
    }
}

impl UploadError {
    /// Recovers the upload error carried by a failed form extraction.
    ///
    /// Content-type failures are rejected by the extractor before any
    /// configured error handler runs, so they arrive as plain actix errors.
    pub fn from_extractor(err: &actix_web::Error) -> Self {
        err.as_error::<UploadError>()
            .cloned()
            .unwrap_or(UploadError::MissingFile)
    }
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::Field { source, .. } => source
                .as_error::<UploadError>()
                .cloned()
                .unwrap_or(UploadError::SaveFailure),
            MultipartError::Payload(_) => {
                UploadError::InvalidRequest("upload exceeds the request size limit".to_string())
            }
            _ => UploadError::InvalidRequest(err.to_string()),
        }
    }
}

/// Failures of the image store, kept apart from [`UploadError`] so the
/// pipeline can react to a name collision before giving up.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display("image already exists: {_0}")]
    AlreadyExists(String),

    #[display("image store IO error: {_0}")]
    Io(io::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}
