use tokio::fs;

use crate::{
    entities::upload::{BatchItem, BatchResult, StoredImage, UploadRequest},
    errors::{StoreError, UploadError},
    repositories::image_store::ImageStore,
    settings::UploadSettings,
    utils::{image_validation::validate_image, name_generator::generate_file_stem},
};

/// Attempts at finding a free name before the upload is reported as failed.
const MAX_NAME_ATTEMPTS: usize = 3;

pub struct UploadHandler<S>
where
    S: ImageStore,
{
    pub store: S,
    pub settings: UploadSettings,
}

impl<S> UploadHandler<S>
where
    S: ImageStore,
{
    pub fn new(store: S, settings: UploadSettings) -> Self {
        UploadHandler { store, settings }
    }

    /// Validates, renames and persists a single upload.
    ///
    /// The temp file is removed after the attempt whatever its outcome.
    pub async fn process(
        &self,
        request: Option<UploadRequest>,
    ) -> Result<StoredImage, UploadError> {
        let request = request.ok_or(UploadError::MissingFile)?;

        let outcome = self.store_image(&request).await;
        request.discard();

        outcome
    }

    /// Runs every upload in order and reports one entry per file.
    ///
    /// A failing file does not stop the batch; only an empty batch fails as
    /// a whole.
    pub async fn process_all(
        &self,
        requests: Vec<UploadRequest>,
    ) -> Result<BatchResult, UploadError> {
        if requests.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let item = match self.store_image(&request).await {
                Ok(image) => BatchItem::stored(&request.original_name, image),
                Err(e) => BatchItem::failed(&request.original_name, &e),
            };
            request.discard();
            results.push(item);
        }

        Ok(results)
    }

    async fn store_image(&self, request: &UploadRequest) -> Result<StoredImage, UploadError> {
        let ext = validate_image(&request.original_name, request.size, &self.settings)?;

        let bytes = fs::read(request.temp_location()).await.map_err(|e| {
            tracing::error!(
                "Failed to read temp file {}: {}",
                request.temp_location().display(),
                e
            );
            UploadError::SaveFailure
        })?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = format!("{}.{}", generate_file_stem(), ext);

            match self.store.save(&file_name, &bytes).await {
                Ok(path) => {
                    tracing::info!(
                        "Stored {} ({} bytes) as {}",
                        request.original_name,
                        bytes.len(),
                        path.display()
                    );
                    return Ok(StoredImage {
                        url: self.settings.public_url(&file_name),
                        file_name,
                        path,
                    });
                }
                Err(StoreError::AlreadyExists(name)) => {
                    tracing::warn!("Generated image name {} already taken, retrying", name);
                }
                Err(e) => {
                    tracing::error!("Failed to store {}: {}", request.original_name, e);
                    return Err(UploadError::SaveFailure);
                }
            }
        }

        tracing::error!(
            "No free image name for {} after {} attempts",
            request.original_name,
            MAX_NAME_ATTEMPTS
        );
        Err(UploadError::SaveFailure)
    }
}
