use std::path::{Path, PathBuf};

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::{Deserialize, Serialize};
use tempfile::TempPath;

use crate::errors::UploadError;

// ───── Multipart Forms ──────────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct SingleImageForm {
    #[multipart(rename = "file")]
    pub file: Option<TempFile>,
}

#[derive(Debug, MultipartForm)]
pub struct MultiImagesForm {
    #[multipart(rename = "files")]
    pub files: Vec<TempFile>,
}

// ───── Pipeline Models ──────────────────────────────────────────────

/// One incoming file, owned by the pipeline until it is discarded.
///
/// The temp file is removed when the request is dropped, even if
/// [`UploadRequest::discard`] was never reached.
#[derive(Debug)]
pub struct UploadRequest {
    pub original_name: String,
    pub size: u64,
    pub temp_path: TempPath,
}

impl UploadRequest {
    pub fn new(original_name: impl Into<String>, size: u64, temp_path: TempPath) -> Self {
        UploadRequest {
            original_name: original_name.into(),
            size,
            temp_path,
        }
    }

    pub fn temp_location(&self) -> &Path {
        &self.temp_path
    }

    /// Deletes the temp file and logs the outcome.
    pub fn discard(self) {
        let location = self.temp_path.to_path_buf();
        match self.temp_path.close() {
            Ok(()) => tracing::info!("Removed temp file {}", location.display()),
            Err(e) => tracing::warn!("Failed to remove temp file {}: {}", location.display(), e),
        }
    }
}

impl From<TempFile> for UploadRequest {
    fn from(file: TempFile) -> Self {
        UploadRequest {
            original_name: file.file_name.unwrap_or_default(),
            size: file.size as u64,
            temp_path: file.file.into_temp_path(),
        }
    }
}

/// Extension accepted by the validator, or the reason for rejecting the file.
pub type ValidationOutcome<'a> = Result<&'a str, UploadError>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredImage {
    pub file_name: String,
    pub path: PathBuf,
    pub url: String,
}

// ───── API Response Models ──────────────────────────────────────────

/// One entry of a batch response, index-aligned with the uploaded files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchItem {
    pub name: String,
    pub url: String,
    pub err: String,
}

impl BatchItem {
    pub fn stored(name: impl Into<String>, image: StoredImage) -> Self {
        BatchItem {
            name: name.into(),
            url: image.url,
            err: String::new(),
        }
    }

    pub fn failed(name: impl Into<String>, err: &UploadError) -> Self {
        BatchItem {
            name: name.into(),
            url: String::new(),
            err: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.err.is_empty()
    }
}

pub type BatchResult = Vec<BatchItem>;
